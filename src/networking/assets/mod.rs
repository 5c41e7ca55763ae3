//! Sprite asset retrieval
//!
//! Avatar layers are plain image files on a static host. This module holds
//! the download side ([`HttpAssetFetcher`]) and the in-memory
//! [`AssetCache`] shared between renders.

pub mod cache;
pub mod fetcher;

pub use cache::{AssetCache, CacheStats, DEFAULT_CACHE_SIZE};
pub use fetcher::{
    asset_file_name, asset_url, AssetFetcher, FetchError, HttpAssetFetcher, DEFAULT_ASSETS_URL,
};
