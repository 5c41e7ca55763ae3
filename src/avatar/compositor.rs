//! Avatar compositor
//!
//! Draws a [`UserStyles`] snapshot by walking its layer plan in order. Each
//! sprite is looked up in the shared [`AssetCache`], downloaded on a miss,
//! decoded and pasted onto a fresh [`Canvas`]. A sprite that cannot be
//! downloaded or decoded is logged and left out; it never aborts the render.

use super::canvas::{decode_sprite, Canvas};
use super::plan::{plan_layers, Layer};
use super::styles::UserStyles;
use crate::networking::assets::{AssetCache, AssetFetcher, FetchError};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why a layer was left out of the picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Fetch(FetchError),
    Decode(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Fetch(err) => write!(f, "{}", err),
            SkipReason::Decode(reason) => write!(f, "undecodable sprite: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLayer {
    pub asset: String,
    pub reason: SkipReason,
}

/// Outcome of one render, in drawing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub pasted: Vec<String>,
    pub skipped: Vec<SkippedLayer>,
}

impl RenderReport {
    /// True when every planned layer made it onto the canvas
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Renders avatars from style snapshots
#[derive(Clone)]
pub struct AvatarCompositor {
    fetcher: Arc<dyn AssetFetcher>,
    cache: AssetCache,
}

impl std::fmt::Debug for AvatarCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCompositor")
            .field("fetcher", &"dyn AssetFetcher")
            .field("cache", &self.cache)
            .finish()
    }
}

impl AvatarCompositor {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, cache: AssetCache) -> Self {
        Self { fetcher, cache }
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Render the avatar. Missing sprites leave gaps instead of failing.
    pub async fn render(&self, styles: &UserStyles) -> Canvas {
        self.render_report(styles).await.0
    }

    /// Render and report which layers were drawn or skipped
    pub async fn render_report(&self, styles: &UserStyles) -> (Canvas, RenderReport) {
        let layers = plan_layers(styles);
        debug!("🎨 Rendering avatar with {} planned layers", layers.len());

        let mut canvas = Canvas::new();
        let mut report = RenderReport::default();

        for layer in &layers {
            match self.paste_layer(&mut canvas, layer).await {
                Ok(()) => report.pasted.push(layer.asset.clone()),
                Err(reason) => {
                    warn!("⚠️ Skipping avatar layer {}: {}", layer.asset, reason);
                    report.skipped.push(SkippedLayer {
                        asset: layer.asset.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            "🎨 Avatar rendered: {} layers pasted, {} skipped",
            report.pasted.len(),
            report.skipped.len()
        );
        (canvas, report)
    }

    async fn paste_layer(&self, canvas: &mut Canvas, layer: &Layer) -> Result<(), SkipReason> {
        let data = self.load_sprite(&layer.asset).await.map_err(SkipReason::Fetch)?;
        let sprite = decode_sprite(&data).map_err(|e| SkipReason::Decode(e.to_string()))?;
        canvas.paste(&sprite, layer.x, layer.y);
        Ok(())
    }

    /// Sprite bytes from the cache, downloading and caching them on a miss
    pub async fn load_sprite(&self, asset: &str) -> Result<Bytes, FetchError> {
        if let Some(data) = self.cache.get(asset).await {
            return Ok(data);
        }

        let data = self.fetcher.fetch(asset).await?;
        self.cache.put(asset, data.clone()).await;
        Ok(data)
    }
}
