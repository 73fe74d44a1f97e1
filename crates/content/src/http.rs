//! HTTP content source (`reqwest`).

use async_trait::async_trait;
use reqwest::{Client, Url};

use memory_match_core::ContentCatalog;

use crate::source::{asset_file_name, ContentSource, LoadError, MediaAsset};

#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: Client,
    catalog_url: Url,
    asset_base: Url,
}

impl HttpContentSource {
    /// `asset_base` is treated as a directory; a trailing `/` is added if missing.
    pub fn new(catalog_url: &str, asset_base: &str) -> Result<Self, LoadError> {
        let catalog_url = Url::parse(catalog_url)
            .map_err(|_| LoadError::InvalidLocation(catalog_url.to_string()))?;

        let base = if asset_base.ends_with('/') {
            asset_base.to_string()
        } else {
            format!("{}/", asset_base)
        };
        // Relative bases resolve against the catalog URL.
        let asset_base = Url::parse(&base)
            .or_else(|_| catalog_url.join(&base))
            .map_err(|_| LoadError::InvalidLocation(base.clone()))?;

        Ok(Self {
            client: Client::new(),
            catalog_url,
            asset_base,
        })
    }

    pub fn asset_url(&self, variant_id: &str) -> Result<Url, LoadError> {
        let name = asset_file_name(variant_id);
        self.asset_base
            .join(&name)
            .map_err(|_| LoadError::InvalidLocation(name))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, LoadError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait(?Send)]
impl ContentSource for HttpContentSource {
    async fn fetch_catalog(&self) -> Result<ContentCatalog, LoadError> {
        let body = self.get(self.catalog_url.clone()).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn load_asset(&self, variant_id: &str) -> Result<MediaAsset, LoadError> {
        let url = self.asset_url(variant_id)?;
        let bytes = self.get(url).await?.bytes().await?;
        Ok(MediaAsset {
            variant_id: variant_id.to_string(),
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_urls_follow_naming_convention() {
        let source =
            HttpContentSource::new("https://example.test/data/catalog.json", "/images/weapons")
                .unwrap();
        assert_eq!(
            source.asset_url("ak-redline").unwrap().as_str(),
            "https://example.test/images/weapons/ak-redline.webp"
        );
    }

    #[test]
    fn absolute_asset_base_is_kept() {
        let source = HttpContentSource::new(
            "https://example.test/catalog.json",
            "https://cdn.example.test/media/",
        )
        .unwrap();
        assert_eq!(
            source.asset_url("x").unwrap().as_str(),
            "https://cdn.example.test/media/x.webp"
        );
    }

    #[test]
    fn invalid_catalog_url_is_rejected() {
        assert!(matches!(
            HttpContentSource::new("not a url", "/images"),
            Err(LoadError::InvalidLocation(_))
        ));
    }
}
