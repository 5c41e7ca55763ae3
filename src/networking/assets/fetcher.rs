//! Sprite download over HTTP
//!
//! Avatar sprites live on a static asset host. The fetcher turns an asset
//! name into a URL, downloads it and reports failures as values so the
//! compositor can decide to skip the layer.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Public bucket holding the mobile app sprite sheet
pub const DEFAULT_ASSETS_URL: &str = "https://habitica-assets.s3.amazonaws.com/mobileApp/images/";

/// Extension appended to asset names that carry none
pub const DEFAULT_ASSET_EXTENSION: &str = "png";

/// Failure to download a single sprite
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to load {asset}: HTTP {status}")]
    Status { asset: String, status: u16 },

    #[error("failed to load {asset}: {reason}")]
    Transport { asset: String, reason: String },

    #[error("invalid asset url for {asset}: {reason}")]
    InvalidUrl { asset: String, reason: String },
}

impl FetchError {
    /// Asset name the error refers to
    pub fn asset(&self) -> &str {
        match self {
            FetchError::Status { asset, .. }
            | FetchError::Transport { asset, .. }
            | FetchError::InvalidUrl { asset, .. } => asset,
        }
    }
}

/// Source of raw sprite bytes
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, asset: &str) -> Result<Bytes, FetchError>;
}

/// Append the default extension unless the name already has one
pub fn asset_file_name(asset: &str) -> String {
    match asset.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => asset.to_string(),
        _ => format!("{}.{}", asset, DEFAULT_ASSET_EXTENSION),
    }
}

/// Build the download URL for an asset relative to `base`
pub fn asset_url(base: &Url, asset: &str) -> Result<Url, FetchError> {
    base.join(&asset_file_name(asset))
        .map_err(|e| FetchError::InvalidUrl {
            asset: asset.to_string(),
            reason: e.to_string(),
        })
}

/// Downloads sprites from the asset host with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpAssetFetcher {
    pub fn new(http_client: reqwest::Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, asset: &str) -> Result<Bytes, FetchError> {
        let url = asset_url(&self.base_url, asset)?;
        debug!("🖼️ Requesting sprite: {}", url);

        let transport = |e: reqwest::Error| FetchError::Transport {
            asset: asset.to_string(),
            reason: e.to_string(),
        };

        let response = self.http_client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!("❌ Failed to download sprite {}: HTTP {}", asset, status.as_u16());
            return Err(FetchError::Status {
                asset: asset.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(transport)?;
        debug!("🖼️ Downloaded sprite {}: {} bytes", asset, data.len());
        Ok(data)
    }
}

/// `Url::join` drops the last path segment unless the base ends with '/'
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
