//! Common test utilities: an in-memory fake of the Drive files API.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router, http::StatusCode};
use followup_core::{DriveConfig, DriveStore, OauthTokenProvider};
use followup_server::config::Config;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const FILE_ID: &str = "fake-file-1";
pub const FILE_NAME: &str = "followup-db.json";

/// In-memory stand-in for the Drive backing store.
#[derive(Default)]
pub struct FakeDrive {
    /// Serialized document content; None until a file is created.
    content: Mutex<Option<String>>,
    /// Number of file-creation uploads observed.
    creates: AtomicUsize,
    /// When set, the next media fetch 404s even though the file
    /// resolved. One-shot.
    vanish_on_fetch: AtomicBool,
    /// When set, media updates fail with a 503.
    fail_writes: AtomicBool,
}

impl FakeDrive {
    pub fn seed(&self, content: &str) {
        *self.content.lock().unwrap() = Some(content.to_string());
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn vanish_on_next_fetch(&self) {
        self.vanish_on_fetch.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

async fn list_files(State(drive): State<Arc<FakeDrive>>) -> Json<serde_json::Value> {
    let exists = drive.content.lock().unwrap().is_some();
    let files = if exists {
        serde_json::json!([{"id": FILE_ID, "name": FILE_NAME}])
    } else {
        serde_json::json!([])
    };
    Json(serde_json::json!({ "files": files }))
}

async fn create_file(
    State(drive): State<Arc<FakeDrive>>,
    body: String,
) -> Json<serde_json::Value> {
    drive.creates.fetch_add(1, Ordering::SeqCst);
    let content = multipart_payload(&body).unwrap_or_default();
    *drive.content.lock().unwrap() = Some(content);
    Json(serde_json::json!({ "id": FILE_ID }))
}

async fn fetch_file(
    State(drive): State<Arc<FakeDrive>>,
    Path(_id): Path<String>,
) -> Result<String, StatusCode> {
    if drive.vanish_on_fetch.swap(false, Ordering::SeqCst) {
        return Err(StatusCode::NOT_FOUND);
    }
    drive.content().ok_or(StatusCode::NOT_FOUND)
}

async fn update_file(
    State(drive): State<Arc<FakeDrive>>,
    Path(id): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if drive.fail_writes.load(Ordering::SeqCst) {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "storage quota".to_string()));
    }
    *drive.content.lock().unwrap() = Some(body);
    Ok(Json(serde_json::json!({ "id": id })))
}

async fn token() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "access_token": "fake-token", "expires_in": 3600 }))
}

/// The document part is the last JSON body of the multipart/related
/// upload.
fn multipart_payload(body: &str) -> Option<String> {
    let tail = body.rsplit("\r\n\r\n").next()?;
    let end = tail.find("\r\n--")?;
    Some(tail[..end].to_string())
}

pub fn fake_drive_router(drive: Arc<FakeDrive>) -> Router {
    Router::new()
        .route("/files", get(list_files))
        .route("/files/{id}", get(fetch_file))
        .route("/upload/files", post(create_file))
        .route("/upload/files/{id}", patch(update_file))
        .route("/token", post(token))
        .with_state(drive)
}

/// Spawn the fake backend on an ephemeral port, returning its base URL.
pub async fn spawn_fake_drive(drive: Arc<FakeDrive>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake_drive_router(drive)).await.unwrap();
    });
    format!("http://{addr}")
}

/// A store wired to the fake backend.
pub fn drive_store(base: &str) -> DriveStore<OauthTokenProvider> {
    let tokens = OauthTokenProvider::new("test-client", "test-secret", "test-refresh")
        .with_token_url(format!("{base}/token"));
    DriveStore::new(
        tokens,
        DriveConfig {
            api_base: base.to_string(),
            upload_base: format!("{base}/upload"),
            file_name: FILE_NAME.to_string(),
        },
    )
}

/// Server config pointed at the fake backend.
pub fn test_config(base: &str, rate_max_writes: u32) -> Config {
    Config {
        drive_api_base: base.to_string(),
        drive_upload_base: format!("{base}/upload"),
        token_url: format!("{base}/token"),
        db_file_name: FILE_NAME.to_string(),
        rate_max_writes,
        user_email: Some("tester@example.com".to_string()),
        client_id: Some("test-client".to_string()),
        client_secret: Some("test-secret".to_string()),
        refresh_token: Some("test-refresh".to_string()),
        ..Config::default()
    }
}
