mod common;

use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use common::{color_for, start_server, SpriteHost};
use habitica_rust::{AvatarSink, ClientSettings, Habitica, HabiticaError};
use image::{ImageFormat, Rgba};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

const USER_ID: &str = "a380546a-94be-4b8e-8a0b-23e0d5c03303";
const API_TOKEN: &str = "cd0e5b7b-7b85-4ac8-a2c7-2b1bb6d4a8a7";

const STYLES_JSON: &str = r#"{
    "preferences": {
        "background": "beach",
        "skin": "5",
        "shirt": "blue",
        "size": "slim",
        "hair": {"color": "red", "base": 3}
    },
    "items": {"gear": {"equipped": {"armor": "armor_base_0"}, "costume": {}}},
    "stats": {"class": "wizard", "buffs": {}}
}"#;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: String,
}

/// Minimal stand-in for the Habitica API plus its sprite host
#[derive(Clone, Default)]
struct MockApi {
    calls: Arc<Mutex<Vec<Recorded>>>,
    sprites: SpriteHost,
}

impl MockApi {
    fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, method: Method, uri: Uri, headers: HeaderMap, body: String) -> Response {
        if uri.path().starts_with("/sprites/") {
            return self.sprites.respond(&uri);
        }

        self.calls.lock().unwrap().push(Recorded {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: headers.clone(),
            body: body.clone(),
        });

        match (method, uri.path()) {
            (Method::POST, "/api/v3/user/auth/local/login") => {
                if body.contains("password=wrong") {
                    return api_error(
                        StatusCode::UNAUTHORIZED,
                        "NotAuthorized",
                        "Incorrect username and/or password.",
                    );
                }
                json(
                    StatusCode::OK,
                    format!(
                        r#"{{"success": true, "data": {{"id": "{}", "apiToken": "{}", "newUser": false, "username": "test-username"}}}}"#,
                        USER_ID, API_TOKEN
                    ),
                )
            }
            (Method::GET, "/api/v3/user") => match headers.get("x-api-user").and_then(|v| v.to_str().ok()) {
                None => api_error(
                    StatusCode::UNAUTHORIZED,
                    "NotAuthorized",
                    "Missing authentication headers.",
                ),
                Some("throttled") => {
                    let mut response = api_error(
                        StatusCode::TOO_MANY_REQUESTS,
                        "TooManyRequests",
                        "Slow down.",
                    );
                    let headers = response.headers_mut();
                    headers.insert("x-ratelimit-limit", "30".parse().unwrap());
                    headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
                    headers.insert("x-ratelimit-reset", "Thu Oct 16 2026 12:00:00 GMT+0000".parse().unwrap());
                    headers.insert("retry-after", "2.4".parse().unwrap());
                    response
                }
                Some(_) => json(
                    StatusCode::OK,
                    format!(r#"{{"success": true, "data": {}, "userV": 7}}"#, STYLES_JSON),
                ),
            },
            _ => api_error(StatusCode::NOT_FOUND, "NotFound", "Not found."),
        }
    }

    fn router(&self) -> Router {
        let api = self.clone();
        Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
                let api = api.clone();
                async move { api.respond(method, uri, headers, body) }
            },
        )
    }
}

fn json(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn api_error(status: StatusCode, error: &str, message: &str) -> Response {
    json(
        status,
        format!(
            r#"{{"success": false, "error": "{}", "message": "{}"}}"#,
            error, message
        ),
    )
}

fn settings_for(addr: SocketAddr) -> ClientSettings {
    ClientSettings {
        base_url: format!("http://{}/", addr),
        assets_url: format!("http://{}/sprites/", addr),
        ..ClientSettings::default()
    }
}

async fn start_api(api: &MockApi) -> SocketAddr {
    let (addr, _server) = start_server(api.router()).await;
    addr
}

#[tokio::test]
async fn test_login_stores_credentials() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr)).unwrap();
    assert!(!client.is_authenticated().await);

    let data = client.login("test-username", "hunter2").await.unwrap();

    assert_eq!(data.id.to_string(), USER_ID);
    assert_eq!(data.api_token, API_TOKEN);
    assert!(client.is_authenticated().await);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].body, "username=test-username&password=hunter2");
    assert!(calls[0].headers.get("x-api-user").is_none());
    let x_client = calls[0].headers.get("x-client").unwrap().to_str().unwrap();
    assert!(x_client.starts_with("4c4ca53f-c059-4ffa-966e-9d29dd405daf"));
    let user_agent = calls[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("habitica-rust/"));

    // Later requests authenticate with the returned pair
    client.get_user_styles().await.unwrap();
    let calls = api.calls();
    assert_eq!(calls[1].headers.get("x-api-user").unwrap(), USER_ID);
    assert_eq!(calls[1].headers.get("x-api-key").unwrap(), API_TOKEN);
}

#[tokio::test]
async fn test_failed_login_is_not_authorized() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr)).unwrap();

    let err = client.login("test-username", "wrong").await.unwrap_err();

    match err {
        HabiticaError::NotAuthorized { error, .. } => {
            assert_eq!(error.message, "Incorrect username and/or password.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_get_user_styles_requests_avatar_fields() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr).with_credentials(USER_ID, API_TOKEN)).unwrap();

    let styles = client.get_user_styles().await.unwrap();

    assert_eq!(styles.preferences.background.as_deref(), Some("beach"));
    assert_eq!(styles.preferences.hair.base, Some(3));
    assert_eq!(styles.stats.class.as_str(), "wizard");

    let calls = api.calls();
    let query = calls[0].query.clone().unwrap();
    let fields: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    assert_eq!(
        fields,
        vec![("userFields".to_string(), "preferences,items,stats".to_string())]
    );
}

#[tokio::test]
async fn test_missing_credentials_map_to_not_authorized() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr)).unwrap();

    let err = client.get_user_styles().await.unwrap_err();

    assert!(matches!(err, HabiticaError::NotAuthorized { .. }));
    assert_eq!(err.api_error().unwrap().error, "NotAuthorized");
}

#[tokio::test]
async fn test_rate_limit_headers_are_reported() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr).with_credentials("throttled", "key")).unwrap();

    let err = client.get_user_styles().await.unwrap_err();

    assert!(matches!(err, HabiticaError::TooManyRequests { .. }));
    let rate_limit = err.rate_limit().unwrap();
    assert_eq!(rate_limit.limit, Some(30));
    assert_eq!(rate_limit.remaining, Some(0));
    assert_eq!(rate_limit.reset.as_deref(), Some("Thu Oct 16 2026 12:00:00 GMT+0000"));
    assert_eq!(rate_limit.retry_after, 2);
}

#[tokio::test]
async fn test_generate_avatar_fetches_styles_and_writes_buffer() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr).with_credentials(USER_ID, API_TOKEN)).unwrap();

    let mut buffer = Vec::new();
    let styles = client
        .generate_avatar(AvatarSink::Buffer(&mut buffer, ImageFormat::Png), None)
        .await
        .unwrap();

    assert_eq!(styles.preferences.skin.as_deref(), Some("5"));
    // armor_base_0 is the empty slot and never requested
    assert_eq!(
        api.sprites.requests(),
        vec![
            "background_beach",
            "skin_5",
            "slim_shirt_blue",
            "head_0",
            "hair_base_3_red",
        ]
    );

    let image = image::load_from_memory_with_format(&buffer, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!((image.width(), image.height()), (141, 147));
    assert_eq!(*image.get_pixel(0, 0), Rgba(color_for("background_beach")));
    assert_eq!(*image.get_pixel(24, 24), Rgba(color_for("hair_base_3_red")));
}

#[tokio::test]
async fn test_generate_avatar_writes_file() {
    let api = MockApi::default();
    let addr = start_api(&api).await;
    let client = Habitica::new(settings_for(addr)).unwrap();
    let styles = habitica_rust::UserStyles::from_json(STYLES_JSON).unwrap();

    let path = std::env::temp_dir().join(format!("habitica-rust-avatar-{}.png", uuid::Uuid::new_v4()));
    client
        .generate_avatar(AvatarSink::Path(path.clone()), Some(styles))
        .await
        .unwrap();

    // Explicit styles skip the API entirely
    assert!(api.calls().is_empty());
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!((image.width(), image.height()), (141, 147));
    assert_eq!(*image.get_pixel(0, 0), Rgba(color_for("background_beach")));

    std::fs::remove_file(path).ok();
}
