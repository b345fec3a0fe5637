//! Network map pipeline: profile location strings → pins → clusters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cluster::{ClusteredMarker, MarkerClusterer};
use crate::location::{GeoPoint, Geotagged, LocationResolver, ParsedLocation};

/// A profile as stored by the backend: a free-text location plus any other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileLocation {
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProfileLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            fields: Map::new(),
        }
    }
}

/// A profile placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePin {
    pub location: ParsedLocation,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Geotagged for ProfilePin {
    fn location(&self) -> GeoPoint {
        self.location.point()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMap {
    pub clusters: Vec<ClusteredMarker<ProfilePin>>,
    pub total_pins: usize,
    /// Pins placed from the tech hub table rather than approximated.
    pub exact_pins: usize,
}

pub fn build_network_map<I>(
    profiles: I,
    resolver: &mut LocationResolver,
    clusterer: &MarkerClusterer,
) -> NetworkMap
where
    I: IntoIterator<Item = ProfileLocation>,
{
    let pins: Vec<ProfilePin> = profiles
        .into_iter()
        .map(|profile| ProfilePin {
            location: resolver.resolve(&profile.location),
            fields: profile.fields,
        })
        .collect();

    let total_pins = pins.len();
    let exact_pins = pins.iter().filter(|p| p.location.is_exact()).count();

    NetworkMap {
        clusters: clusterer.cluster(pins),
        total_pins,
        exact_pins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hubs_cluster_together() {
        let profiles = vec![
            ProfileLocation::new("Berlin, Germany"),
            ProfileLocation::new("berlin"),
            ProfileLocation::new("Tokyo - Japan"),
        ];
        let map = build_network_map(profiles, &mut LocationResolver::seeded(3), &MarkerClusterer::default());

        assert_eq!(map.total_pins, 3);
        assert_eq!(map.exact_pins, 3);
        assert_eq!(map.clusters.len(), 2);
        assert_eq!(map.clusters[0].len(), 2);
        assert_eq!(map.clusters[0].lat, 52.52);
        assert_eq!(map.clusters[1].points[0].location.city.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_every_profile_is_placed() {
        let profiles: Vec<ProfileLocation> = ["", "Atlantis", "NYC", "Gotham, USA", "Lisbon"]
            .into_iter()
            .map(ProfileLocation::new)
            .collect();
        let map = build_network_map(profiles, &mut LocationResolver::seeded(11), &MarkerClusterer::default());

        let placed: usize = map.clusters.iter().map(|c| c.len()).sum();
        assert_eq!(placed, 5);
        assert_eq!(map.exact_pins, 2);
        assert!(map.clusters.iter().all(|c| c.centroid().is_finite()));
    }

    #[test]
    fn test_profile_fields_survive() {
        let profiles: Vec<ProfileLocation> = serde_json::from_value(json!([
            { "id": "0xabc", "username": "vitalik", "location": "Zug, Switzerland" },
            { "id": "0xdef" }
        ]))
        .unwrap();
        assert_eq!(profiles[1].location, "");

        let map = build_network_map(profiles, &mut LocationResolver::seeded(0), &MarkerClusterer::default());
        let out = serde_json::to_value(&map).unwrap();
        assert_eq!(out["clusters"][0]["points"][0]["username"], "vitalik");
        assert_eq!(out["clusters"][0]["points"][0]["location"]["city"], "Zug");
        assert_eq!(out["total_pins"], 2);
    }
}
