use crate::networking::assets::{DEFAULT_ASSETS_URL, DEFAULT_CACHE_SIZE};
use crate::networking::HabiticaResult;
use ::config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "HABITICA";

pub const DEFAULT_URL: &str = "https://habitica.com/";

// =============================================================================
// Client Settings
// =============================================================================

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// API host, e.g. a self-hosted instance
    pub base_url: String,
    /// Host serving avatar sprites
    pub assets_url: String,
    pub api_user: Option<String>,
    pub api_key: Option<String>,
    /// Custom `X-CLIENT` header, `"<developer user id> - <app name>"`
    pub x_client: Option<String>,
    /// Number of sprites kept in memory, 0 disables the cache
    pub cache_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            assets_url: DEFAULT_ASSETS_URL.to_string(),
            api_user: None,
            api_key: None,
            x_client: None,
            cache_size: DEFAULT_CACHE_SIZE,
            request_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("assets_url", &self.assets_url)
            .field("api_user", &self.api_user)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("x_client", &self.x_client)
            .field("cache_size", &self.cache_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ClientSettings {
    pub fn with_credentials(mut self, api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.api_user = Some(api_user.into());
        self.api_key = Some(api_key.into());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Configuration file management
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "habitica", "habitica-rust")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
}

/// Load settings: defaults, then the TOML file, then `HABITICA_*` variables.
///
/// An explicit `path` must exist; the platform default file is optional.
pub fn load_settings(path: Option<&Path>) -> HabiticaResult<ClientSettings> {
    load_settings_with_env_prefix(path, ENV_PREFIX)
}

pub fn load_settings_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> HabiticaResult<ClientSettings> {
    let mut builder = Config::builder().add_source(Config::try_from(&ClientSettings::default())?);

    match path {
        Some(path) => {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        None => {
            if let Some(path) = settings_path() {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
            }
        }
    }

    let settings = builder
        .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
        .build()?
        .try_deserialize::<ClientSettings>()?;

    Ok(settings)
}

pub fn save_settings(settings: &ClientSettings, path: &Path) -> HabiticaResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(settings)
        .map_err(|e| crate::networking::HabiticaError::config(e.to_string()))?;
    fs::write(path, toml)?;
    Ok(())
}
