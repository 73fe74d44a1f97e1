//! Application configuration.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use memory_match_content::ContentConfig;

use crate::location::PageUrl;

pub const DEFAULT_STATE_DIR: &str = ".memory-match";
pub const DEFAULT_PAGE_URL: &str = "http://localhost/";

/// File under the state directory holding per-tab session keys.
pub const TAB_STORE_FILE: &str = "session.json";
/// File under the state directory holding the history log.
pub const DURABLE_STORE_FILE: &str = "history.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page URL {value:?}: {reason}")]
    InvalidPageUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub content: ContentConfig,
    /// Directory holding the JSON store files.
    pub state_dir: PathBuf,
    /// Address the session starts from; its `seed` parameter resumes a game.
    pub page_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            page_url: DEFAULT_PAGE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    ///
    /// - `MEMORY_MATCH_CATALOG`, `MEMORY_MATCH_ASSETS`: see [`ContentConfig::from_env`]
    /// - `MEMORY_MATCH_STATE_DIR`: store directory (default `.memory-match`)
    /// - `MEMORY_MATCH_PAGE_URL`: starting address (default `http://localhost/`)
    ///
    /// An unparsable page URL is logged and replaced by the default.
    pub fn from_env() -> Self {
        let mut config = Self {
            content: ContentConfig::from_env(),
            ..Self::default()
        };

        if let Some(dir) = non_empty_var("MEMORY_MATCH_STATE_DIR") {
            config.state_dir = PathBuf::from(dir);
        }
        if let Some(url) = non_empty_var("MEMORY_MATCH_PAGE_URL") {
            match PageUrl::parse(&url) {
                Ok(_) => config.page_url = url,
                Err(e) => tracing::warn!(error = %e, "ignoring MEMORY_MATCH_PAGE_URL"),
            }
        }
        config
    }

    pub fn tab_store_path(&self) -> PathBuf {
        self.state_dir.join(TAB_STORE_FILE)
    }

    pub fn durable_store_path(&self) -> PathBuf {
        self.state_dir.join(DURABLE_STORE_FILE)
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn page(&self) -> Result<PageUrl, ConfigError> {
        PageUrl::parse(&self.page_url)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
