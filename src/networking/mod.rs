//! Habitica API networking
//!
//! The REST client, its error taxonomy and the sprite download machinery
//! used by the avatar renderer.

pub mod assets;
pub mod auth;
pub mod client;
pub mod types;

// Re-export main types for convenience
pub use client::{AvatarSink, Habitica};
pub use types::{ApiErrorResponse, ApiResponse, RateLimit};

// Error types
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HabiticaError {
    #[error("Not authorized: {}", error.message)]
    NotAuthorized { error: ApiErrorResponse, rate_limit: RateLimit },

    #[error("Not found: {}", error.message)]
    NotFound { error: ApiErrorResponse, rate_limit: RateLimit },

    #[error("Bad request: {}", error.message)]
    BadRequest { error: ApiErrorResponse, rate_limit: RateLimit },

    #[error("Too many requests: {}", error.message)]
    TooManyRequests { error: ApiErrorResponse, rate_limit: RateLimit },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Failed to parse response: {reason}")]
    Parse { reason: String },

    #[error("Image error: {reason}")]
    Image { reason: String },

    #[error("I/O error: {reason}")]
    Io { reason: String },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("{reason}")]
    Other { reason: String },
}

pub type HabiticaResult<T> = Result<T, HabiticaError>;

impl HabiticaError {
    pub fn config(reason: impl Into<String>) -> Self {
        HabiticaError::Config { reason: reason.into() }
    }

    /// Error body returned by the API, for status-mapped errors
    pub fn api_error(&self) -> Option<&ApiErrorResponse> {
        match self {
            HabiticaError::NotAuthorized { error, .. }
            | HabiticaError::NotFound { error, .. }
            | HabiticaError::BadRequest { error, .. }
            | HabiticaError::TooManyRequests { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Rate limit headers sent with a status-mapped error
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        match self {
            HabiticaError::NotAuthorized { rate_limit, .. }
            | HabiticaError::NotFound { rate_limit, .. }
            | HabiticaError::BadRequest { rate_limit, .. }
            | HabiticaError::TooManyRequests { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HabiticaError {
    fn from(err: reqwest::Error) -> Self {
        HabiticaError::Transport { reason: err.to_string() }
    }
}

impl From<serde_json::Error> for HabiticaError {
    fn from(err: serde_json::Error) -> Self {
        HabiticaError::Parse { reason: err.to_string() }
    }
}

impl From<image::ImageError> for HabiticaError {
    fn from(err: image::ImageError) -> Self {
        HabiticaError::Image { reason: err.to_string() }
    }
}

impl From<std::io::Error> for HabiticaError {
    fn from(err: std::io::Error) -> Self {
        HabiticaError::Io { reason: err.to_string() }
    }
}

impl From<url::ParseError> for HabiticaError {
    fn from(err: url::ParseError) -> Self {
        HabiticaError::Config { reason: format!("invalid URL: {}", err) }
    }
}

impl From<::config::ConfigError> for HabiticaError {
    fn from(err: ::config::ConfigError) -> Self {
        HabiticaError::Config { reason: err.to_string() }
    }
}
