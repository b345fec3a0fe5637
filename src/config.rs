//! File-based configuration at ~/.web3-atlas/config.json.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! A file that exists but does not parse is an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogKind};
use crate::cluster::DEFAULT_CLUSTER_RADIUS;
use crate::error::{check_radius, AtlasError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cluster: ClusterConfig,
    pub resolver: ResolverConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub radius: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { radius: DEFAULT_CLUSTER_RADIUS }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Fixed seed for approximate placement. Unset means a fresh seed per process.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub extra_blockchains: Vec<String>,
    pub extra_platforms: Vec<String>,
}

impl Config {
    /// Load from the default location (~/.web3-atlas/config.json).
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = serde_json::from_str(&data)
            .map_err(|e| AtlasError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".web3-atlas")
            .join("config.json")
    }

    pub fn validate(&self) -> Result<()> {
        check_radius(self.cluster.radius)?;
        if self.server.port == 0 {
            return Err(AtlasError::config("server.port must be non-zero"));
        }
        Ok(())
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Built-in entries for `kind` plus the configured extras.
    pub fn catalog(&self, kind: CatalogKind) -> Catalog {
        let extra = match kind {
            CatalogKind::Blockchain => &self.catalog.extra_blockchains,
            CatalogKind::Platform => &self.catalog.extra_platforms,
        };
        Catalog::with_entries(kind, extra)
    }
}
