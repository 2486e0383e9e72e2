//! Multipart decoding for submission uploads.
//!
//! The request carries one JSON `metadata` part plus the uploaded files in
//! `files` (PDF) and `images` parts. Decoding only reconstructs the shape;
//! content rules are the consolidator's job.

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::StreamExt;

use crate::ErrorResponse;

use super::models::{NewSubmission, SubmissionMetadata, UploadedFile};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionMultipartError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
}

impl From<SubmissionMultipartError> for HttpResponse {
    fn from(error: SubmissionMultipartError) -> Self {
        match error {
            SubmissionMultipartError::MetadataError(_)
            | SubmissionMultipartError::Utf8Error(_)
            | SubmissionMultipartError::FieldError(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!("{}", error)))
            }
            _ => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", error))),
        }
    }
}

pub struct SubmissionMultipart;

impl SubmissionMultipart {
    pub async fn parse(
        mut multipart: Multipart,
    ) -> Result<NewSubmission, SubmissionMultipartError> {
        let mut metadata: Option<SubmissionMetadata> = None;
        let mut files: Vec<UploadedFile> = Vec::new();

        while let Some(item) = multipart.next().await {
            let mut field =
                item.map_err(|e| SubmissionMultipartError::FieldError(e.to_string()))?;
            let content_disposition = field.content_disposition().ok_or_else(|| {
                SubmissionMultipartError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| {
                    SubmissionMultipartError::FieldError("Field name not found".to_string())
                })?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(|s| s.to_string());
            let declared_type = field.content_type().map(|mime| mime.to_string());

            let mut buffer = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| SubmissionMultipartError::IoError(e.to_string()))?;
                buffer.extend_from_slice(&data);
            }

            match name.as_str() {
                "metadata" => {
                    let raw = String::from_utf8(buffer)
                        .map_err(|e| SubmissionMultipartError::Utf8Error(e.to_string()))?;
                    let parsed: SubmissionMetadata = serde_json::from_str(&raw)
                        .map_err(|e| SubmissionMultipartError::MetadataError(e.to_string()))?;
                    metadata = Some(parsed);
                }
                "files" | "images" => {
                    let file_name = maybe_filename
                        .unwrap_or_else(|| format!("file_{}.dat", files.len()));
                    let content_type = declared_type
                        .or_else(|| {
                            mime_guess::from_path(&file_name)
                                .first_raw()
                                .map(|m| m.to_string())
                        })
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    files.push(UploadedFile {
                        content: buffer,
                        content_type,
                        file_name,
                    });
                }
                _ => continue,
            }
        }

        let metadata = metadata.ok_or_else(|| {
            SubmissionMultipartError::MetadataError("metadata part is missing".to_string())
        })?;

        Ok(NewSubmission { metadata, files })
    }
}
