//! Subcommand logic behind the `atlas` binary.
//!
//! Command-line flags win over config values; the binary only parses
//! arguments and prints what these return.

use serde::Serialize;
use std::fs;
use std::io::{self, Read};

use crate::catalog::{Catalog, CatalogKind};
use crate::cluster::{ClusteredMarker, Marker, MarkerClusterer};
use crate::config::Config;
use crate::error::{check_radius, Result};
use crate::location::{LocationResolver, ParsedLocation};
use crate::map::{build_network_map, NetworkMap, ProfileLocation};

/// Read a file, or stdin when `input` is "-".
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn effective_radius(flag: Option<f64>, config: &Config) -> Result<f64> {
    check_radius(flag.unwrap_or(config.cluster.radius))
}

pub fn effective_seed(flag: Option<u64>, config: &Config) -> Option<u64> {
    flag.or(config.resolver.seed)
}

pub fn parse(locations: &[String], seed: Option<u64>, config: &Config) -> Vec<ParsedLocation> {
    let mut resolver = LocationResolver::from_seed(effective_seed(seed, config));
    resolver.resolve_all(locations.iter().map(String::as_str))
}

/// Cluster a JSON array of markers.
pub fn cluster(json: &str, radius: Option<f64>, config: &Config) -> Result<Vec<ClusteredMarker<Marker>>> {
    let radius = effective_radius(radius, config)?;
    let markers: Vec<Marker> = serde_json::from_str(json)?;
    Ok(MarkerClusterer::new(radius).cluster(markers))
}

/// Parse and cluster a JSON array of profiles.
pub fn map(json: &str, radius: Option<f64>, seed: Option<u64>, config: &Config) -> Result<NetworkMap> {
    let radius = effective_radius(radius, config)?;
    let profiles: Vec<ProfileLocation> = serde_json::from_str(json)?;
    let mut resolver = LocationResolver::from_seed(effective_seed(seed, config));
    Ok(build_network_map(profiles, &mut resolver, &MarkerClusterer::new(radius)))
}

pub fn catalog(kind: CatalogKind, add: &[String], config: &Config) -> Catalog {
    let mut catalog = config.catalog(kind);
    for name in add {
        catalog.extend(name);
    }
    catalog
}

pub fn apply_server_overrides(config: &mut Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()
}
