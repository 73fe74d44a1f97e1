//! Content location configuration.

use std::env;

use crate::dir::DirContentSource;
use crate::http::HttpContentSource;
use crate::source::{ContentSource, LoadError};

pub const DEFAULT_CATALOG: &str = "data/catalog.json";
pub const DEFAULT_ASSETS: &str = "images/weapons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// URL (`http://`, `https://`) or filesystem path of the catalog document.
    pub catalog: String,
    /// Base URL or directory holding `<variantId>.webp` assets.
    pub assets: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG.to_string(),
            assets: DEFAULT_ASSETS.to_string(),
        }
    }
}

impl ContentConfig {
    /// Create from environment variables
    ///
    /// - `MEMORY_MATCH_CATALOG`: catalog location (default `data/catalog.json`)
    /// - `MEMORY_MATCH_ASSETS`: asset location (default `images/weapons`)
    pub fn from_env() -> Self {
        let read = |name: &str, default: &str| {
            env::var(name)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            catalog: read("MEMORY_MATCH_CATALOG", DEFAULT_CATALOG),
            assets: read("MEMORY_MATCH_ASSETS", DEFAULT_ASSETS),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.catalog.starts_with("http://") || self.catalog.starts_with("https://")
    }

    /// Build the matching source: HTTP for URLs, filesystem otherwise.
    pub fn build_source(&self) -> Result<Box<dyn ContentSource>, LoadError> {
        if self.is_remote() {
            Ok(Box::new(HttpContentSource::new(&self.catalog, &self.assets)?))
        } else {
            Ok(Box::new(DirContentSource::new(&self.catalog, &self.assets)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        let mut config = ContentConfig::default();
        assert!(!config.is_remote());
        assert!(config.build_source().is_ok());

        config.catalog = "https://example.test/catalog.json".into();
        assert!(config.is_remote());
        assert!(config.build_source().is_ok());
    }
}
