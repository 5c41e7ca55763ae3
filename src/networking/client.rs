//! High-level Habitica client
//!
//! Owns the HTTP session, the identification and credential headers, and the
//! avatar compositor with its sprite cache. Only the endpoints needed to
//! authenticate and to render avatars are exposed here.

use crate::avatar::{AvatarCompositor, Canvas, UserStyles};
use crate::config::ClientSettings;
use crate::networking::assets::{fetcher::with_trailing_slash, AssetCache, HttpAssetFetcher};
use crate::networking::auth::{
    user_agent, x_client, ApiCredentials, LoginData, LoginRequest, HEADER_API_KEY, HEADER_API_USER,
    HEADER_CLIENT,
};
use crate::networking::{ApiErrorResponse, ApiResponse, HabiticaError, HabiticaResult, RateLimit};
use image::ImageFormat;
use reqwest::header::USER_AGENT;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use url::Url;

/// Fields needed to draw an avatar
pub const AVATAR_USER_FIELDS: &[&str] = &["preferences", "items", "stats"];

/// Where a generated avatar is written
#[derive(Debug)]
pub enum AvatarSink<'a> {
    /// File path; the format follows the extension
    Path(PathBuf),
    /// In-memory buffer with an explicit format
    Buffer(&'a mut Vec<u8>, ImageFormat),
}

/// Habitica API client
pub struct Habitica {
    http_client: reqwest::Client,
    base_url: Url,
    user_agent: String,
    x_client: String,
    credentials: Arc<RwLock<Option<ApiCredentials>>>,
    compositor: AvatarCompositor,
}

impl std::fmt::Debug for Habitica {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Habitica")
            .field("base_url", &self.base_url.as_str())
            .field("x_client", &self.x_client)
            .field("compositor", &self.compositor)
            .finish()
    }
}

impl Habitica {
    /// Create a client with its own HTTP session
    pub fn new(settings: ClientSettings) -> HabiticaResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Self::with_http_client(http_client, settings)
    }

    /// Create a client on top of an existing HTTP session
    pub fn with_http_client(http_client: reqwest::Client, settings: ClientSettings) -> HabiticaResult<Self> {
        let credentials =
            ApiCredentials::from_parts(settings.api_user.as_deref(), settings.api_key.as_deref())?;
        let x_client = x_client(settings.x_client.as_deref())?;
        let base_url = with_trailing_slash(Url::parse(&settings.base_url)?);
        let assets_url = Url::parse(&settings.assets_url)?;

        let fetcher = HttpAssetFetcher::new(http_client.clone(), assets_url);
        let compositor = AvatarCompositor::new(Arc::new(fetcher), AssetCache::new(settings.cache_size));

        info!("🌐 Habitica client for {} (authenticated: {})", base_url, credentials.is_some());

        Ok(Self {
            http_client,
            base_url,
            user_agent: user_agent(),
            x_client,
            credentials: Arc::new(RwLock::new(credentials)),
            compositor,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn compositor(&self) -> &AvatarCompositor {
        &self.compositor
    }

    /// Sprite cache shared by every render of this client
    pub fn asset_cache(&self) -> &AssetCache {
        self.compositor.cache()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    /// Log in with username (or email) and password.
    ///
    /// The returned user id and API token are used for all later requests.
    pub async fn login(&self, username: &str, password: &str) -> HabiticaResult<LoginData> {
        let url = self.endpoint("api/v3/user/auth/local/login")?;
        let request = self
            .http_client
            .post(url)
            .form(&LoginRequest { username, password });

        let response: ApiResponse<LoginData> = self.send(request).await?;
        let data = response.data;

        *self.credentials.write().await =
            Some(ApiCredentials::new(data.id.to_string(), data.api_token.clone()));
        info!("🔐 Logged in as {}", data.username);

        Ok(data)
    }

    /// Fetch the authenticated user's avatar styles
    pub async fn get_user_styles(&self) -> HabiticaResult<UserStyles> {
        let url = self.endpoint("api/v3/user")?;
        let request = self
            .http_client
            .get(url)
            .query(&[("userFields", AVATAR_USER_FIELDS.join(","))]);

        let response: ApiResponse<UserStyles> = self.send(request).await?;
        Ok(response.data)
    }

    /// Render an avatar and write it to `sink`.
    ///
    /// Without `styles` the authenticated user's styles are fetched first.
    /// Returns the styles that were drawn.
    pub async fn generate_avatar(
        &self,
        sink: AvatarSink<'_>,
        styles: Option<UserStyles>,
    ) -> HabiticaResult<UserStyles> {
        let styles = match styles {
            Some(styles) => styles,
            None => self.get_user_styles().await?,
        };

        let canvas = self.compositor.render(&styles).await;
        write_avatar(canvas, sink).await?;
        Ok(styles)
    }

    fn endpoint(&self, path: &str) -> HabiticaResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Attach headers, send, map error statuses and parse the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> HabiticaResult<T> {
        let mut request = request
            .header(USER_AGENT, &self.user_agent)
            .header(HEADER_CLIENT, &self.x_client);
        if let Some(credentials) = self.credentials.read().await.as_ref() {
            request = request
                .header(HEADER_API_USER, &credentials.api_user)
                .header(HEADER_API_KEY, &credentials.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let rate_limit = RateLimit::from_headers(response.headers());
        let url = response.url().clone();
        let body = response.text().await?;
        debug!("🌐 {} -> {} ({} bytes)", url, status, body.len());

        if !status.is_success() {
            let err = map_status(status, &body, rate_limit);
            error!("❌ Request to {} failed: {}", url.path(), err);
            return Err(err);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn map_status(status: StatusCode, body: &str, rate_limit: RateLimit) -> HabiticaError {
    let error = || ApiErrorResponse::from_body(body, status.as_u16());
    match status {
        StatusCode::UNAUTHORIZED => HabiticaError::NotAuthorized { error: error(), rate_limit },
        StatusCode::NOT_FOUND => HabiticaError::NotFound { error: error(), rate_limit },
        StatusCode::BAD_REQUEST => HabiticaError::BadRequest { error: error(), rate_limit },
        StatusCode::TOO_MANY_REQUESTS => HabiticaError::TooManyRequests { error: error(), rate_limit },
        _ => HabiticaError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        },
    }
}

async fn write_avatar(canvas: Canvas, sink: AvatarSink<'_>) -> HabiticaResult<()> {
    match sink {
        AvatarSink::Path(path) => {
            debug!("💾 Saving avatar to {}", path.display());
            tokio::task::spawn_blocking(move || canvas.save(&path))
                .await
                .map_err(|e| HabiticaError::Other { reason: e.to_string() })?
        }
        AvatarSink::Buffer(buffer, format) => {
            let mut cursor = Cursor::new(buffer);
            canvas.write_to(&mut cursor, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_half_credentials() {
        let mut settings = ClientSettings::default();
        settings.api_user = Some("user".to_string());
        assert!(matches!(Habitica::new(settings), Err(HabiticaError::Config { .. })));
    }

    #[test]
    fn test_new_rejects_bad_x_client() {
        let settings = ClientSettings {
            x_client: Some("my app".to_string()),
            ..ClientSettings::default()
        };
        assert!(matches!(Habitica::new(settings), Err(HabiticaError::Config { .. })));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let settings = ClientSettings {
            base_url: "http://localhost:3000/habitica".to_string(),
            ..ClientSettings::default()
        };
        let client = Habitica::new(settings).unwrap();
        assert_eq!(
            client.endpoint("api/v3/user").unwrap().as_str(),
            "http://localhost:3000/habitica/api/v3/user"
        );
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"success": false, "error": "TooManyRequests", "message": "Slow down"}"#;
        let err = map_status(StatusCode::TOO_MANY_REQUESTS, body, RateLimit::default());
        assert!(matches!(err, HabiticaError::TooManyRequests { .. }));
        assert_eq!(err.api_error().unwrap().message, "Slow down");

        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "{}", RateLimit::default()),
            HabiticaError::NotFound { .. }
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, "{}", RateLimit::default()),
            HabiticaError::BadRequest { .. }
        ));
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "{}", RateLimit::default()),
            HabiticaError::NotAuthorized { .. }
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "oops", RateLimit::default()),
            HabiticaError::Http { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_configured_credentials_authenticate() {
        let client = Habitica::new(ClientSettings::default().with_credentials("user", "key")).unwrap();
        assert!(client.is_authenticated().await);
        assert_eq!(client.asset_cache().capacity(), 32);
    }
}
