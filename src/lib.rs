//! Geographic backend for a Web3 professional network.
//!
//! Turns free-text profile locations into map points and groups those
//! points into clusters for the dashboard's network map.

pub mod catalog;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod map;
pub mod server;

pub use error::{AtlasError, Result};
