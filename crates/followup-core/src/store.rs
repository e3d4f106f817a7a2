//! Remote document store backed by a single Drive app-data file.
//!
//! The whole document is one opaque JSON blob: every read fetches it in
//! full and every write replaces it in full. There is no optimistic
//! concurrency check and no retry; the last writer wins.

use crate::Result;
use crate::auth::TokenProvider;
use crate::error::FollowupError;
use followup_types::Database;
use serde::Deserialize;
use tracing::{debug, info, warn};

const MULTIPART_BOUNDARY: &str = "followup_boundary";

/// Endpoints and file naming for the backing store.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub api_base: String,
    pub upload_base: String,
    pub file_name: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.googleapis.com/drive/v3".to_string(),
            upload_base: "https://www.googleapis.com/upload/drive/v3".to_string(),
            file_name: "followup-db.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Store for the single JSON document in the user's hidden app folder.
pub struct DriveStore<P> {
    client: reqwest::Client,
    tokens: P,
    config: DriveConfig,
}

impl<P: TokenProvider> DriveStore<P> {
    pub fn new(tokens: P, config: DriveConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            tokens,
            config,
        }
    }

    /// Resolve the backing file id, creating the file when absent.
    ///
    /// Creation is not atomic against concurrent creators: two racing
    /// first writes can leave duplicate backing files, in which case the
    /// first listed file is used from then on.
    pub async fn ensure_document(&self) -> Result<String> {
        let token = self.tokens.access_token().await?;
        match self.find_file(&token).await? {
            Some(id) => Ok(id),
            None => {
                info!(target: "followup::store", "no backing document, creating one");
                self.create_file(&token).await
            }
        }
    }

    /// Fetch the current document.
    ///
    /// A backing file that vanished between resolution and fetch is
    /// silently re-created, and content that fails to parse is replaced
    /// by the initial empty document. All other remote failures
    /// propagate.
    pub async fn read(&self) -> Result<Database> {
        let file_id = self.ensure_document().await?;
        let token = self.tokens.access_token().await?;

        let url = format!("{}/files/{}", self.config.api_base, file_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("alt", "media")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!(target: "followup::store", "backing document vanished, recreating");
            self.create_file(&token).await?;
            return Ok(Database::initial());
        }
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(db) => Ok(db),
            Err(err) => {
                warn!(
                    target: "followup::store",
                    "backing document unreadable ({err}), starting from empty"
                );
                Ok(Database::initial())
            }
        }
    }

    /// Overwrite the entire backing content with `db`.
    ///
    /// Write failures always propagate; a swallowed error here would
    /// falsely imply the change was saved.
    pub async fn write(&self, db: &Database) -> Result<()> {
        let file_id = self.ensure_document().await?;
        let token = self.tokens.access_token().await?;

        let url = format!("{}/files/{}", self.config.upload_base, file_id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(&token)
            .query(&[("uploadType", "media")])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(db)?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        debug!(
            target: "followup::store",
            "saved document ({} contacts, {} interactions, {} tasks)",
            db.contacts.len(),
            db.interactions.len(),
            db.tasks.len()
        );
        Ok(())
    }

    async fn find_file(&self, token: &str) -> Result<Option<String>> {
        let url = format!("{}/files", self.config.api_base);
        let query = format!("name='{}'", self.config.file_name);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("spaces", "appDataFolder"),
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let list: FileList = response.json().await?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    async fn create_file(&self, token: &str) -> Result<String> {
        let metadata = serde_json::json!({
            "name": self.config.file_name,
            "parents": ["appDataFolder"],
            "mimeType": "application/json",
        });
        let initial = serde_json::to_string(&Database::initial())?;

        // Metadata and content in one multipart/related request.
        let body = [
            format!("--{MULTIPART_BOUNDARY}"),
            "Content-Type: application/json; charset=UTF-8".to_string(),
            String::new(),
            metadata.to_string(),
            format!("--{MULTIPART_BOUNDARY}"),
            "Content-Type: application/json".to_string(),
            String::new(),
            initial,
            format!("--{MULTIPART_BOUNDARY}--"),
        ]
        .join("\r\n");

        let url = format!("{}/files", self.config.upload_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let created: CreatedFile = response.json().await?;
        info!(target: "followup::store", "created backing document {}", created.id);
        Ok(created.id)
    }
}

async fn remote_error(response: reqwest::Response) -> FollowupError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    FollowupError::Remote { status, body }
}
