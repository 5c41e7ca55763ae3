pub mod settings;

// Re-export commonly used types
pub use settings::{
    load_settings, load_settings_with_env_prefix, save_settings, settings_path, ClientSettings,
    DEFAULT_URL, ENV_PREFIX,
};
