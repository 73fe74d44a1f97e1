//! Bootstrap loading: catalog fetch plus bulk media prefetch.
//!
//! Neither step fails to the caller. A missing catalog means placeholder
//! content; a failed asset is recorded as `false` in the status map and the
//! rest of the batch carries on.

use std::collections::BTreeMap;

use futures::future::join_all;

use memory_match_core::ContentCatalog;

use crate::source::{ContentSource, MediaAsset};

/// Loaded assets and the per-id load status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaCache {
    assets: BTreeMap<String, MediaAsset>,
    status: BTreeMap<String, bool>,
}

impl MediaCache {
    pub fn get(&self, variant_id: &str) -> Option<&MediaAsset> {
        self.assets.get(variant_id)
    }

    pub fn is_loaded(&self, variant_id: &str) -> bool {
        self.status.get(variant_id).copied().unwrap_or(false)
    }

    /// Status for every attempted id.
    pub fn status(&self) -> &BTreeMap<String, bool> {
        &self.status
    }

    pub fn loaded_count(&self) -> usize {
        self.assets.len()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.status
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(id, _)| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}

/// Fetch the catalog, logging and swallowing any failure.
pub async fn fetch_catalog_or_none(source: &dyn ContentSource) -> Option<ContentCatalog> {
    match source.fetch_catalog().await {
        Ok(catalog) => {
            tracing::debug!(items = catalog.items.len(), "catalog loaded");
            Some(catalog)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load catalog, using placeholder content");
            None
        }
    }
}

/// Load one asset per distinct variant id, concurrently.
pub async fn prefetch_assets(source: &dyn ContentSource, catalog: &ContentCatalog) -> MediaCache {
    let ids = catalog.variant_ids();
    if ids.is_empty() {
        tracing::warn!("catalog has no variants, nothing to prefetch");
        return MediaCache::default();
    }

    let loads = ids.into_iter().map(|id| async move {
        let result = source.load_asset(&id).await;
        (id, result)
    });

    let mut cache = MediaCache::default();
    for (id, result) in join_all(loads).await {
        match result {
            Ok(asset) => {
                cache.assets.insert(id.clone(), asset);
                cache.status.insert(id, true);
            }
            Err(e) => {
                tracing::warn!(variant_id = %id, error = %e, "failed to load asset");
                cache.status.insert(id, false);
            }
        }
    }

    tracing::debug!(
        loaded = cache.loaded_count(),
        attempted = cache.status.len(),
        "media prefetch finished"
    );
    cache
}
