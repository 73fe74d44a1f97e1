//! Directory-backed content source (`tokio::fs`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use memory_match_core::ContentCatalog;

use crate::source::{asset_file_name, ContentSource, LoadError, MediaAsset};

/// Reads the catalog document and assets from the local filesystem.
#[derive(Debug, Clone)]
pub struct DirContentSource {
    catalog_path: PathBuf,
    asset_dir: PathBuf,
}

impl DirContentSource {
    pub fn new(catalog_path: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            asset_dir: asset_dir.into(),
        }
    }

    pub fn asset_path(&self, variant_id: &str) -> PathBuf {
        self.asset_dir.join(asset_file_name(variant_id))
    }
}

async fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait(?Send)]
impl ContentSource for DirContentSource {
    async fn fetch_catalog(&self) -> Result<ContentCatalog, LoadError> {
        let bytes = read(&self.catalog_path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn load_asset(&self, variant_id: &str) -> Result<MediaAsset, LoadError> {
        let bytes = read(&self.asset_path(variant_id)).await?;
        Ok(MediaAsset {
            variant_id: variant_id.to_string(),
            bytes,
        })
    }
}
