//! Core types for the location subsystem.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::regions::Region;

/// A latitude/longitude pair in degrees.
///
/// Deserialization is permissive: a missing or non-numeric coordinate
/// becomes `NaN` instead of failing. `NaN` serializes back as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default = "nan", deserialize_with = "lenient_coord")]
    pub lat: f64,
    #[serde(default = "nan", deserialize_with = "lenient_coord")]
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// A point with both coordinates unknown.
    pub fn unknown() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

fn nan() -> f64 {
    f64::NAN
}

fn lenient_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(f64::NAN))
}

/// Anything that can be placed on the map.
pub trait Geotagged {
    fn location(&self) -> GeoPoint;
}

impl Geotagged for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Geotagged + ?Sized> Geotagged for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

/// How a location's coordinates were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Exact hit in the tech hub table.
    TechHub,
    /// Random point inside a populated region box.
    Approximate,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TechHub => write!(f, "Tech hub"),
            Self::Approximate => write!(f, "Approximate"),
        }
    }
}

/// Result of parsing a free-text location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub source: LocationSource,
    /// Region box the point was drawn from, for approximate locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl ParsedLocation {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn is_exact(&self) -> bool {
        self.source == LocationSource::TechHub
    }

    /// "City, Country" label, or whichever part is known.
    pub fn label(&self) -> Option<String> {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
            (Some(city), None) => Some(city.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }
}

impl Geotagged for ParsedLocation {
    fn location(&self) -> GeoPoint {
        self.point()
    }
}
