//! Location resolver: free text → best-effort map point.
//!
//! Flow:  empty input → random region point
//!        "city, country" → tech hub table → random region point (labels kept)
//!
//! Never fails. Unknown cities still get a plausible point, just not an exact one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::hubs;
use super::regions;
use super::types::{LocationSource, ParsedLocation};

/// Separators in precedence order: the first one present in the input wins.
const SEPARATORS: [char; 3] = [',', '-', '/'];

/// The location resolver with its own random source.
pub struct LocationResolver {
    rng: StdRng,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Create a resolver whose approximate points are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Seeded if `seed` is set, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_default()
    }

    pub fn resolve(&mut self, raw: &str) -> ParsedLocation {
        parse_location_with(raw, &mut self.rng)
    }

    pub fn resolve_all<'a, I>(&mut self, raws: I) -> Vec<ParsedLocation>
    where
        I: IntoIterator<Item = &'a str>,
    {
        raws.into_iter().map(|raw| self.resolve(raw)).collect()
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a location string using the thread-local random source.
pub fn parse_location(raw: &str) -> ParsedLocation {
    parse_location_with(raw, &mut rand::thread_rng())
}

/// Parse a location string, drawing fallback coordinates from `rng`.
pub fn parse_location_with<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> ParsedLocation {
    let parts = split_location(raw);

    let (city, country) = match parts.as_slice() {
        [] => return approximate(None, None, rng),
        [only] => (only.as_str(), None),
        [first, .., last] => (first.as_str(), Some(last.as_str())),
    };

    let city_label = Some(to_title_case(city));
    let country_label = country.map(to_title_case);

    match hubs::lookup(city) {
        Some(hub) => ParsedLocation {
            city: city_label,
            country: country_label,
            lat: hub.lat,
            lng: hub.lng,
            source: LocationSource::TechHub,
            region: None,
        },
        None => {
            debug!(city, ?country, "no tech hub match, using approximate region");
            approximate(city_label, country_label, rng)
        }
    }
}

fn approximate<R: Rng + ?Sized>(
    city: Option<String>,
    country: Option<String>,
    rng: &mut R,
) -> ParsedLocation {
    let (region, point) = regions::random_point(rng);
    ParsedLocation {
        city,
        country,
        lat: point.lat,
        lng: point.lng,
        source: LocationSource::Approximate,
        region: Some(region),
    }
}

/// Trim and lowercase, then split on the first separator present.
///
/// "Winston-Salem, USA" splits on the comma only; "Berlin - Germany" on the hyphen.
pub fn split_location(raw: &str) -> Vec<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = match SEPARATORS.iter().find(|sep| normalized.contains(**sep)) {
        Some(sep) => normalized.split(*sep).collect(),
        None => vec![normalized.as_str()],
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Uppercase the first character of every space-separated word, lowercase the rest.
pub fn to_title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            let Some(first) = chars.next() else {
                return String::new();
            };
            // 'ß' uppercases to "SS"; only the first output char stays upper.
            let mut upper = first.to_uppercase();
            let mut out: String = upper.next().into_iter().collect();
            out.extend(upper.flat_map(char::to_lowercase));
            out.extend(chars.flat_map(char::to_lowercase));
            out
        })
        .collect::<Vec<String>>()
        .join(" ")
}
