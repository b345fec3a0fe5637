//! Location subsystem for the network map.
//!
//! Parses free-text profile locations into coordinates using a built-in
//! tech hub table, with random placement inside a populated region as fallback.

pub mod hubs;
pub mod regions;
pub mod resolver;
pub mod types;

pub use hubs::{hub_list, HubInfo};
pub use regions::Region;
pub use resolver::{parse_location, parse_location_with, to_title_case, LocationResolver};
pub use types::{GeoPoint, Geotagged, LocationSource, ParsedLocation};
