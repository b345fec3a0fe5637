//! Selectable option lists (blockchains, platforms) for profiles and job posts.
//!
//! A `Catalog` is a plain value. Custom entries a user types in extend their
//! own copy only; persistent extras come from the config file.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::AtlasError;

const DEFAULT_BLOCKCHAINS: &[&str] = &[
    "Ethereum", "Bitcoin", "Solana", "Polygon", "Arbitrum", "Optimism",
    "Base", "Avalanche", "BNB Chain", "Cosmos", "Polkadot", "Near",
];

const DEFAULT_PLATFORMS: &[&str] = &[
    "GitHub", "Twitter", "LinkedIn", "Discord", "Telegram", "Farcaster",
    "Lens", "Mirror",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Blockchain,
    Platform,
}

impl CatalogKind {
    fn defaults(self) -> &'static [&'static str] {
        match self {
            Self::Blockchain => DEFAULT_BLOCKCHAINS,
            Self::Platform => DEFAULT_PLATFORMS,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blockchain => write!(f, "blockchains"),
            Self::Platform => write!(f, "platforms"),
        }
    }
}

impl FromStr for CatalogKind {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blockchain" | "blockchains" | "chains" => Ok(Self::Blockchain),
            "platform" | "platforms" => Ok(Self::Platform),
            _ => Err(AtlasError::UnknownCatalog(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    kind: CatalogKind,
    entries: Vec<String>,
}

impl Catalog {
    /// The built-in entries for `kind`.
    pub fn defaults(kind: CatalogKind) -> Self {
        Self::with_entries(kind, std::iter::empty::<&str>())
    }

    /// Built-in entries followed by `extra`, deduplicated.
    pub fn with_entries<I, S>(kind: CatalogKind, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self { kind, entries: Vec::new() };
        for name in kind.defaults() {
            catalog.extend(name);
        }
        for name in extra {
            catalog.extend(name.as_ref());
        }
        catalog
    }

    /// Add a custom entry. Returns false if it is blank or already present
    /// (case-insensitively).
    pub fn extend(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.entries.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.entries.iter().any(|e| e.to_lowercase() == name)
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
