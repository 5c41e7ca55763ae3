//! Response envelopes shared by every endpoint

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Standard success envelope: `{ "success": true, "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub notifications: Vec<serde_json::Value>,
    #[serde(default)]
    pub user_v: Option<i64>,
    #[serde(default)]
    pub app_version: Option<String>,
}

/// Error body sent with 4xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiErrorResponse {
    /// Parse an error body, falling back to the raw text as message
    pub fn from_body(body: &str, status: u16) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            success: false,
            error: format!("HTTP {}", status),
            message: body.to_string(),
        })
    }
}

/// Rate limit information from the `x-ratelimit-*` and `retry-after` headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Reset time exactly as sent by the server
    pub reset: Option<String>,
    /// Seconds to wait before retrying, rounded
    pub retry_after: u64,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim);

        Self {
            limit: text("x-ratelimit-limit").and_then(|v| v.parse().ok()),
            remaining: text("x-ratelimit-remaining").and_then(|v| v.parse().ok()),
            reset: text("x-ratelimit-reset").map(str::to_string),
            retry_after: text("retry-after")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v.round() as u64)
                .unwrap_or(0),
        }
    }
}
