// habitica-rust: async Habitica API client with avatar rendering

pub mod avatar;
pub mod config;
pub mod networking;
pub mod utils;

// Re-export commonly used types for convenience
pub use avatar::{AvatarCompositor, Canvas, RenderReport, UserStyles};
pub use crate::config::{load_settings, ClientSettings};
pub use networking::assets::{AssetCache, AssetFetcher, FetchError, HttpAssetFetcher};
pub use networking::{AvatarSink, Habitica, HabiticaError, HabiticaResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
