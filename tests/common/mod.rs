#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use image::{ImageFormat, Rgba, RgbaImage};
use tokio::net::TcpListener;

/// Distinct opaque color per asset name
pub fn color_for(asset: &str) -> [u8; 4] {
    let sum: u32 = asset.bytes().map(u32::from).sum();
    [(sum % 251) as u8, (sum * 7 % 253) as u8, (sum * 13 % 241) as u8, 255]
}

pub fn sprite_png(color: [u8; 4]) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::from_pixel(1, 1, Rgba(color))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub async fn start_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

/// Sprite host that records requested file names and answers 404 for a
/// configurable set of them
#[derive(Clone, Default)]
pub struct SpriteHost {
    requests: Arc<Mutex<Vec<String>>>,
    missing: Arc<HashSet<String>>,
}

impl SpriteHost {
    pub fn with_missing(missing: &[&str]) -> Self {
        Self {
            requests: Arc::default(),
            missing: Arc::new(missing.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// Requested file names without their extension, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|file| file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file).to_string())
            .collect()
    }

    /// Raw requested file names
    pub fn files(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn respond(&self, uri: &Uri) -> Response {
        let file = uri.path().rsplit('/').next().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(file.clone());

        let stem = file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&file);
        if self.missing.contains(stem) {
            return (StatusCode::NOT_FOUND, "no such sprite").into_response();
        }

        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            sprite_png(color_for(stem)),
        )
            .into_response()
    }

    pub fn router(&self) -> Router {
        let host = self.clone();
        Router::new().fallback(move |uri: Uri| {
            let host = host.clone();
            async move { host.respond(&uri) }
        })
    }
}
