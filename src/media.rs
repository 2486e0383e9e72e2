//! Remote media-host client.
//!
//! Uploaded submission files live on a third-party media host, not on this
//! server. The host exposes bucket-scoped file endpoints authenticated with an
//! API key; uploads answer with a public URL and the host-side identifier we
//! keep in submission records for later deletion.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use utoipa::ToSchema;

const DEFAULT_BUCKET: &str = "internship-media";

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
}

impl MediaConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("MEDIA_HOST_URL")?;
        let api_key = env::var("MEDIA_HOST_API_KEY")?;
        let bucket = env::var("MEDIA_HOST_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        })
    }
}

/// Durable pointer returned by the media host after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredFileReference {
    pub url: String,
    pub public_id: String,
    pub format: String,
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub folder: String,
    pub format: String,
    pub public_id_hint: Option<String>,
}

/// Result of a remote delete. A file the host no longer knows about counts as
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Missing,
}

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("media host request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("media host rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected media host response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        data: Vec<u8>,
        options: UploadOptions,
    ) -> Result<StoredFileReference, MediaStoreError>;

    async fn delete(&self, public_id: &str) -> Result<DeleteOutcome, MediaStoreError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    #[serde(alias = "publicId")]
    public_id: String,
    format: String,
}

/// `MediaStore` implementation speaking the media host's REST API.
pub struct HostedMediaStore {
    config: MediaConfig,
    client: reqwest::Client,
}

impl HostedMediaStore {
    pub fn new(config: MediaConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn files_url(&self) -> String {
        format!(
            "{}/v1/buckets/{}/files",
            self.config.base_url, self.config.bucket
        )
    }
}

#[async_trait]
impl MediaStore for HostedMediaStore {
    async fn upload(
        &self,
        data: Vec<u8>,
        options: UploadOptions,
    ) -> Result<StoredFileReference, MediaStoreError> {
        let file_name = options
            .public_id_hint
            .clone()
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_ext(&options.format)
            .first_raw()
            .unwrap_or("application/octet-stream");

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| MediaStoreError::InvalidResponse(e.to_string()))?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", options.folder.clone())
            .text("format", options.format.clone());
        if let Some(hint) = options.public_id_hint {
            form = form.text("public_id", hint);
        }

        let response = self
            .client
            .post(self.files_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaStoreError::Rejected(format!("{status}: {body}")));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaStoreError::InvalidResponse(e.to_string()))?;

        Ok(StoredFileReference {
            url: parsed.url,
            public_id: parsed.public_id,
            format: parsed.format,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<DeleteOutcome, MediaStoreError> {
        let url = format!("{}/{}", self.files_url(), public_id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::Missing);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MediaStoreError::Rejected(format!("{status}: {body}")));
        }

        Ok(DeleteOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slash() {
        std::env::set_var("MEDIA_HOST_URL", "https://media.example.com/");
        std::env::set_var("MEDIA_HOST_API_KEY", "test-key");
        std::env::remove_var("MEDIA_HOST_BUCKET");

        let config = MediaConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://media.example.com");
        assert_eq!(config.bucket, DEFAULT_BUCKET);
    }

    #[test]
    fn upload_response_accepts_camel_case_ids() {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"url":"https://m/x.png","publicId":"submissions/u/images/x","format":"png"}"#,
        )
        .unwrap();
        assert_eq!(parsed.public_id, "submissions/u/images/x");
    }
}
