//! Content source abstraction and the error type shared by its backends.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use memory_match_core::ContentCatalog;

/// File extension of every media asset.
pub const ASSET_EXTENSION: &str = "webp";

/// Asset file name for a variant id: `<variantId>.webp`.
pub fn asset_file_name(variant_id: &str) -> String {
    format!("{}.{}", variant_id, ASSET_EXTENSION)
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid location {0:?}")]
    InvalidLocation(String),
}

/// Raw bytes of a loaded asset. Decoding is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub variant_id: String,
    pub bytes: Vec<u8>,
}

/// Where the catalog document and media assets come from.
#[async_trait(?Send)]
pub trait ContentSource {
    async fn fetch_catalog(&self) -> Result<ContentCatalog, LoadError>;

    async fn load_asset(&self, variant_id: &str) -> Result<MediaAsset, LoadError>;
}
