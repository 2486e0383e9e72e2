//! Submission data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::media::StoredFileReference;

/// Closed set of file kinds a weekly submission may carry. Upload routing and
/// the per-submission count rule hang off the variant instead of ad hoc
/// media-type string checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    PdfDocument,
}

impl FileKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" | "image/jpeg" => Some(FileKind::Image),
            "application/pdf" => Some(FileKind::PdfDocument),
            _ => None,
        }
    }

    /// Host-side folder for this kind, scoped per user.
    pub fn folder(self, user_id: Uuid) -> String {
        match self {
            FileKind::Image => format!("submissions/{user_id}/images"),
            FileKind::PdfDocument => format!("submissions/{user_id}/pdfs"),
        }
    }

    pub fn max_per_submission(self) -> usize {
        match self {
            FileKind::Image => 3,
            FileKind::PdfDocument => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::PdfDocument => "PDF",
        }
    }
}

/// An uploaded file as decoded from the request, before it reaches the media
/// host.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl UploadedFile {
    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_mime(&self.content_type)
    }

    /// Media-host format token derived from the declared media type.
    pub fn format(&self) -> &str {
        self.content_type
            .rsplit('/')
            .next()
            .unwrap_or(&self.content_type)
    }
}

/// Structured metadata accompanying the uploaded files of one weekly
/// submission.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    pub user_id: Uuid,
    pub username: String,
    #[serde(default)]
    pub department_id: Option<Uuid>,
    pub week_number: i32,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// One fully decoded submission request.
#[derive(Debug)]
pub struct NewSubmission {
    pub metadata: SubmissionMetadata,
    pub files: Vec<UploadedFile>,
}

/// The per-user submission record. Created on the first accepted week and
/// mutated append-only afterwards; every field list keeps prior entries
/// untouched and in order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub department_id: Option<Uuid>,
    pub completed_weeks: Vec<i32>,
    pub images: Vec<StoredFileReference>,
    pub pdfs: Vec<StoredFileReference>,
    pub links: Vec<String>,
    pub notes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Seed a record from the first accepted week of a user.
    pub fn first_week(
        metadata: &SubmissionMetadata,
        images: Vec<StoredFileReference>,
        pdfs: Vec<StoredFileReference>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: metadata.user_id,
            username: metadata.username.clone(),
            department_id: metadata.department_id,
            completed_weeks: vec![metadata.week_number],
            images,
            pdfs,
            links: metadata.links.clone(),
            notes: metadata.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn file_references(&self) -> impl Iterator<Item = &StoredFileReference> {
        self.images.iter().chain(self.pdfs.iter())
    }
}

/// Append-only delta applied to an existing record for one new week.
#[derive(Debug, Clone)]
pub struct WeekUpdate {
    pub week_number: i32,
    pub images: Vec<StoredFileReference>,
    pub pdfs: Vec<StoredFileReference>,
    pub links: Vec<String>,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_accepts_only_png_jpeg_pdf() {
        assert_eq!(FileKind::from_mime("image/png"), Some(FileKind::Image));
        assert_eq!(FileKind::from_mime("image/jpeg"), Some(FileKind::Image));
        assert_eq!(
            FileKind::from_mime("application/pdf"),
            Some(FileKind::PdfDocument)
        );
        assert_eq!(FileKind::from_mime("image/gif"), None);
        assert_eq!(FileKind::from_mime("text/plain"), None);
    }

    #[test]
    fn folders_are_scoped_per_user_and_kind() {
        let user = Uuid::new_v4();
        assert_eq!(
            FileKind::Image.folder(user),
            format!("submissions/{user}/images")
        );
        assert_eq!(
            FileKind::PdfDocument.folder(user),
            format!("submissions/{user}/pdfs")
        );
    }

    #[test]
    fn uploaded_file_format_comes_from_the_media_type() {
        let file = UploadedFile {
            content: vec![1],
            content_type: "image/png".to_string(),
            file_name: "shot.png".to_string(),
        };
        assert_eq!(file.format(), "png");
    }

    #[test]
    fn metadata_deserializes_from_camel_case() {
        let metadata: SubmissionMetadata = serde_json::from_str(
            r#"{
                "userId": "7c29fb5e-95a4-4a66-b0ed-5c153e43b1a7",
                "username": "jane",
                "weekNumber": 2,
                "links": ["https://repo.example.com"],
                "notes": ["finished the survey"]
            }"#,
        )
        .unwrap();
        assert_eq!(metadata.week_number, 2);
        assert_eq!(metadata.department_id, None);
        assert_eq!(metadata.links.len(), 1);
    }
}
