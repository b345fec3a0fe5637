//! Greedy marker clustering for the network map.
//!
//! Single forward pass, first-fit: each marker joins the first existing
//! cluster (in creation order) whose centroid is within the threshold,
//! otherwise it seeds a new cluster. Clusters are not re-balanced.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::location::{GeoPoint, Geotagged};

/// Default radius in pixel-equivalent units.
pub const DEFAULT_CLUSTER_RADIUS: f64 = 40.0;

/// Kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Kilometers of threshold per radius unit: radius 40 → 0.4 km.
const RADIUS_TO_KM: f64 = 0.01;

/// A group of markers drawn as a single pin.
///
/// `lat`/`lng` always equal the mean of the points' coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredMarker<T> {
    pub lat: f64,
    pub lng: f64,
    pub points: Vec<T>,
}

impl<T: Geotagged> ClusteredMarker<T> {
    fn seed(marker: T) -> Self {
        let loc = marker.location();
        Self {
            lat: loc.lat,
            lng: loc.lng,
            points: vec![marker],
        }
    }

    fn push(&mut self, marker: T) {
        self.points.push(marker);
        let n = self.points.len() as f64;
        let (sum_lat, sum_lng) = self.points.iter().fold((0.0, 0.0), |(la, ln), p| {
            let loc = p.location();
            (la + loc.lat, ln + loc.lng)
        });
        self.lat = sum_lat / n;
        self.lng = sum_lng / n;
    }

    pub fn centroid(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Equirectangular distance in km between `from` and `to`.
///
/// The longitude term is scaled by the cosine of `from`'s latitude.
/// NaN coordinates give a NaN distance.
pub fn planar_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let dx = (to.lat - from.lat) * KM_PER_DEGREE;
    let dy = (to.lng - from.lng) * KM_PER_DEGREE * (from.lat * std::f64::consts::PI / 180.0).cos();
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerClusterer {
    radius: f64,
}

impl MarkerClusterer {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance below which a marker joins a cluster.
    pub fn threshold_km(&self) -> f64 {
        self.radius * RADIUS_TO_KM
    }

    pub fn cluster<T, I>(&self, markers: I) -> Vec<ClusteredMarker<T>>
    where
        T: Geotagged,
        I: IntoIterator<Item = T>,
    {
        let threshold = self.threshold_km();
        let mut clusters: Vec<ClusteredMarker<T>> = Vec::new();
        let mut total = 0usize;

        for marker in markers {
            total += 1;
            let loc = marker.location();
            // NaN distances fail the comparison, so bad points stay alone.
            match clusters
                .iter_mut()
                .find(|c| planar_distance_km(loc, c.centroid()) < threshold)
            {
                Some(cluster) => cluster.push(marker),
                None => clusters.push(ClusteredMarker::seed(marker)),
            }
        }

        debug!(markers = total, clusters = clusters.len(), radius = self.radius, "clustered markers");
        clusters
    }
}

impl Default for MarkerClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER_RADIUS)
    }
}

/// Cluster `markers` with the given radius.
pub fn cluster_markers<T, I>(markers: I, radius: f64) -> Vec<ClusteredMarker<T>>
where
    T: Geotagged,
    I: IntoIterator<Item = T>,
{
    MarkerClusterer::new(radius).cluster(markers)
}

/// A generic map record: a location plus whatever fields the caller attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(default)]
    pub location: GeoPoint,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Marker {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            location: GeoPoint::new(lat, lng),
            fields: serde_json::Map::new(),
        }
    }
}

impl Geotagged for Marker {
    fn location(&self) -> GeoPoint {
        self.location
    }
}
