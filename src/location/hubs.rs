//! Built-in table of well-known tech and Web3 hubs.

use serde::Serialize;

pub struct TechHub {
    names: &'static [&'static str], // canonical + aliases, lowercase
    pub lat: f64,
    pub lng: f64,
    pub country: &'static str,
}

impl TechHub {
    pub fn name(&self) -> &'static str {
        self.names[0]
    }
}

const TECH_HUBS: &[TechHub] = &[
    TechHub {
        names: &["san francisco", "sf"],
        lat: 37.7749, lng: -122.4194,
        country: "USA",
    },
    TechHub {
        names: &["new york", "new york city", "nyc"],
        lat: 40.7128, lng: -74.0060,
        country: "USA",
    },
    TechHub {
        names: &["austin"],
        lat: 30.2672, lng: -97.7431,
        country: "USA",
    },
    TechHub {
        names: &["miami"],
        lat: 25.7617, lng: -80.1918,
        country: "USA",
    },
    TechHub {
        names: &["toronto"],
        lat: 43.6532, lng: -79.3832,
        country: "Canada",
    },
    TechHub {
        names: &["london"],
        lat: 51.5074, lng: -0.1278,
        country: "UK",
    },
    TechHub {
        names: &["berlin"],
        lat: 52.5200, lng: 13.4050,
        country: "Germany",
    },
    TechHub {
        names: &["paris"],
        lat: 48.8566, lng: 2.3522,
        country: "France",
    },
    TechHub {
        names: &["amsterdam"],
        lat: 52.3676, lng: 4.9041,
        country: "Netherlands",
    },
    TechHub {
        names: &["zug"],
        lat: 47.1662, lng: 8.5155,
        country: "Switzerland",
    },
    TechHub {
        names: &["lisbon"],
        lat: 38.7223, lng: -9.1393,
        country: "Portugal",
    },
    TechHub {
        names: &["dubai"],
        lat: 25.2048, lng: 55.2708,
        country: "UAE",
    },
    TechHub {
        names: &["singapore"],
        lat: 1.3521, lng: 103.8198,
        country: "Singapore",
    },
    TechHub {
        names: &["hong kong"],
        lat: 22.3193, lng: 114.1694,
        country: "Hong Kong",
    },
    TechHub {
        names: &["tokyo"],
        lat: 35.6762, lng: 139.6503,
        country: "Japan",
    },
    TechHub {
        names: &["seoul"],
        lat: 37.5665, lng: 126.9780,
        country: "South Korea",
    },
    TechHub {
        names: &["bangalore", "bengaluru"],
        lat: 12.9716, lng: 77.5946,
        country: "India",
    },
    TechHub {
        names: &["sydney"],
        lat: -33.8688, lng: 151.2093,
        country: "Australia",
    },
];

/// Exact, case-insensitive lookup of a city name or alias.
pub fn lookup(city: &str) -> Option<&'static TechHub> {
    let q = city.trim().to_lowercase();
    TECH_HUBS.iter().find(|hub| hub.names.iter().any(|name| *name == q))
}

/// A hub entry for the public hub list API.
#[derive(Debug, Clone, Serialize)]
pub struct HubInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

/// Return the full hub table (for autocomplete / API).
pub fn hub_list() -> Vec<HubInfo> {
    TECH_HUBS
        .iter()
        .map(|h| HubInfo {
            name: super::resolver::to_title_case(h.name()),
            aliases: h.names[1..].iter().map(|a| a.to_string()).collect(),
            country: h.country.to_string(),
            lat: h.lat,
            lng: h.lng,
        })
        .collect()
}
