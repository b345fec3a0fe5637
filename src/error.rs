use std::io;
use thiserror::Error;

/// Errors raised by the outer surfaces (config, CLI input, HTTP API).
///
/// The location parser and the clusterer are total and never produce one.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid cluster radius: {0} (must be a finite, non-negative number)")]
    InvalidRadius(f64),

    #[error("Unknown catalog '{0}'. Use 'blockchains' or 'platforms'.")]
    UnknownCatalog(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;

impl AtlasError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AtlasError::Config(msg.into())
    }
}

/// Accept a radius only if it is finite and non-negative.
pub fn check_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(AtlasError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_radius() {
        assert_eq!(check_radius(40.0).unwrap(), 40.0);
        assert_eq!(check_radius(0.0).unwrap(), 0.0);
        assert!(check_radius(-1.0).is_err());
        assert!(check_radius(f64::NAN).is_err());
        assert!(check_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let e = AtlasError::UnknownCatalog("wallets".into());
        assert!(e.to_string().contains("wallets"));
        let e = AtlasError::config("bad port");
        assert_eq!(e.to_string(), "Configuration error: bad port");
    }
}
