//! Weekly-submission consolidation.
//!
//! One submission call validates its inputs locally, fans the files out to the
//! media host, and folds the resulting references into the user's record with
//! at-most-once-per-week semantics. Every failure after the first successful
//! upload compensates by deleting what already landed on the host, so the host
//! never holds files no record references.

use std::sync::Arc;

use futures::future::join_all;
use log::{error, info, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::media::{DeleteOutcome, MediaStore, MediaStoreError, StoredFileReference, UploadOptions};
use crate::metrics::SUBMISSION_ROLLBACKS;

use super::models::{FileKind, NewSubmission, SubmissionMetadata, SubmissionRecord, UploadedFile, WeekUpdate};
use super::repository::{AppendOutcome, CreateOutcome, RepositoryError, SubmissionRepository};

pub const MAX_FILE_BYTES: usize = 3 * 1024 * 1024;
pub const MAX_FILES_PER_SUBMISSION: usize = 4;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid submission: {0}")]
    Validation(String),
    #[error("failed to upload {file_name}: {source}")]
    Upload {
        file_name: String,
        #[source]
        source: MediaStoreError,
    },
    #[error("submission for week {0} already exists")]
    DuplicateWeek(i32),
    #[error("submission not found")]
    NotFound,
    #[error("failed to delete {failed} of {attempted} remote files")]
    Cleanup { attempted: usize, failed: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates uploads, duplicate-week checks and record persistence for
/// weekly submissions.
#[derive(Clone)]
pub struct SubmissionConsolidator {
    media: Arc<dyn MediaStore>,
    repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionConsolidator {
    pub fn new(media: Arc<dyn MediaStore>, repository: Arc<dyn SubmissionRepository>) -> Self {
        Self { media, repository }
    }

    /// Accept one week's submission. On success the returned record reflects
    /// the applied update.
    pub async fn submit(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let NewSubmission { metadata, files } = submission;
        validate(&metadata, &files)?;

        let uploaded = self.upload_all(metadata.user_id, files).await?;
        let mut images = Vec::new();
        let mut pdfs = Vec::new();
        for (kind, reference) in uploaded {
            match kind {
                FileKind::Image => images.push(reference),
                FileKind::PdfDocument => pdfs.push(reference),
            }
        }

        match self.persist(&metadata, images.clone(), pdfs.clone()).await {
            Ok(record) => {
                info!(
                    "submission accepted: user={} week={} images={} pdfs={}",
                    metadata.user_id,
                    metadata.week_number,
                    images.len(),
                    pdfs.len()
                );
                Ok(record)
            }
            Err(err) => {
                let refs: Vec<StoredFileReference> =
                    images.into_iter().chain(pdfs.into_iter()).collect();
                self.rollback_uploads(&refs).await;
                Err(err)
            }
        }
    }

    /// Remove a submission record and every remote file it references. The
    /// record itself is only deleted once all remote deletions succeeded.
    pub async fn delete_submission(&self, id: Uuid) -> Result<(), SubmissionError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SubmissionError::NotFound)?;

        let references: Vec<StoredFileReference> = record.file_references().cloned().collect();
        let attempted = references.len();
        let outcomes = join_all(
            references
                .iter()
                .map(|reference| self.media.delete(&reference.public_id)),
        )
        .await;

        let mut failed = 0usize;
        for (reference, outcome) in references.iter().zip(outcomes) {
            match outcome {
                Ok(DeleteOutcome::Removed) => {}
                Ok(DeleteOutcome::Missing) => {
                    warn!("remote file {} was already gone", reference.public_id);
                }
                Err(err) => {
                    failed += 1;
                    error!("failed to delete remote file {}: {err}", reference.public_id);
                }
            }
        }

        if failed > 0 {
            return Err(SubmissionError::Cleanup { attempted, failed });
        }

        self.repository.delete_by_id(id).await?;
        info!("submission {id} deleted along with {attempted} remote files");
        Ok(())
    }

    pub async fn submissions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SubmissionRecord>, SubmissionError> {
        Ok(self
            .repository
            .find_by_user(user_id)
            .await?
            .into_iter()
            .collect())
    }

    pub async fn submissions_by_week(
        &self,
        user_id: Uuid,
        week_number: i32,
    ) -> Result<Vec<SubmissionRecord>, SubmissionError> {
        Ok(self.repository.find_by_week(user_id, week_number).await?)
    }

    /// Upload every file concurrently. If any upload fails, files that did
    /// land are deleted before the error is returned.
    async fn upload_all(
        &self,
        user_id: Uuid,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<(FileKind, StoredFileReference)>, SubmissionError> {
        let uploads = files.into_iter().map(|file| {
            // Validation already established the kind.
            let kind = file.kind().expect("validated file kind");
            let options = UploadOptions {
                folder: kind.folder(user_id),
                format: file.format().to_string(),
                public_id_hint: Some(public_id_hint(&file.file_name)),
            };
            let file_name = file.file_name.clone();
            async move {
                let result = self.media.upload(file.content, options).await;
                (kind, file_name, result)
            }
        });

        let outcomes = join_all(uploads).await;

        let mut references = Vec::with_capacity(outcomes.len());
        let mut failure: Option<(String, MediaStoreError)> = None;
        for (kind, file_name, result) in outcomes {
            match result {
                Ok(reference) => references.push((kind, reference)),
                Err(err) if failure.is_none() => failure = Some((file_name, err)),
                Err(err) => warn!("additional upload failure for {file_name}: {err}"),
            }
        }

        if let Some((file_name, source)) = failure {
            let landed: Vec<StoredFileReference> =
                references.into_iter().map(|(_, r)| r).collect();
            self.rollback_uploads(&landed).await;
            return Err(SubmissionError::Upload { file_name, source });
        }

        Ok(references)
    }

    async fn persist(
        &self,
        metadata: &SubmissionMetadata,
        images: Vec<StoredFileReference>,
        pdfs: Vec<StoredFileReference>,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let week = metadata.week_number;

        if let Some(existing) = self.repository.find_by_user(metadata.user_id).await? {
            if existing.completed_weeks.contains(&week) {
                return Err(SubmissionError::DuplicateWeek(week));
            }
            return self.append(metadata, images, pdfs).await;
        }

        let record = SubmissionRecord::first_week(metadata, images.clone(), pdfs.clone());
        match self.repository.create(&record).await? {
            CreateOutcome::Created => Ok(record),
            // Another request created the record first; fold into it instead.
            CreateOutcome::AlreadyExists => self.append(metadata, images, pdfs).await,
        }
    }

    async fn append(
        &self,
        metadata: &SubmissionMetadata,
        images: Vec<StoredFileReference>,
        pdfs: Vec<StoredFileReference>,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let update = WeekUpdate {
            week_number: metadata.week_number,
            images,
            pdfs,
            links: metadata.links.clone(),
            notes: metadata.notes.clone(),
        };

        match self.repository.append_week(metadata.user_id, &update).await? {
            AppendOutcome::Updated => self
                .repository
                .find_by_user(metadata.user_id)
                .await?
                .ok_or_else(|| {
                    RepositoryError::Backend(
                        "submission record disappeared while updating".to_string(),
                    )
                    .into()
                }),
            AppendOutcome::DuplicateWeek => {
                Err(SubmissionError::DuplicateWeek(metadata.week_number))
            }
            AppendOutcome::NoRecord => Err(RepositoryError::Backend(
                "submission record removed while updating".to_string(),
            )
            .into()),
        }
    }

    /// Compensating deletes for uploads that must not outlive a failed
    /// submission. Best effort: a file the host refuses to drop is logged and
    /// left behind rather than masking the original error.
    async fn rollback_uploads(&self, references: &[StoredFileReference]) {
        if references.is_empty() {
            return;
        }
        SUBMISSION_ROLLBACKS.inc();

        let outcomes = join_all(
            references
                .iter()
                .map(|reference| self.media.delete(&reference.public_id)),
        )
        .await;

        for (reference, outcome) in references.iter().zip(outcomes) {
            if let Err(err) = outcome {
                error!(
                    "compensating delete failed for {}: {err}",
                    reference.public_id
                );
            }
        }
    }
}

fn public_id_hint(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    format!("{}_{}", Uuid::new_v4(), sanitize_filename::sanitize(stem))
}

fn validate(
    metadata: &SubmissionMetadata,
    files: &[UploadedFile],
) -> Result<(), SubmissionError> {
    if metadata.week_number < 1 {
        return Err(SubmissionError::Validation(
            "week number must be at least 1".to_string(),
        ));
    }
    if metadata.username.trim().is_empty() {
        return Err(SubmissionError::Validation(
            "username is required".to_string(),
        ));
    }
    if files.is_empty() {
        return Err(SubmissionError::Validation(
            "at least one file is required".to_string(),
        ));
    }
    if files.len() > MAX_FILES_PER_SUBMISSION {
        return Err(SubmissionError::Validation(format!(
            "too many files: maximum is {MAX_FILES_PER_SUBMISSION} (1 PDF and 3 images)"
        )));
    }

    let mut image_count = 0usize;
    let mut pdf_count = 0usize;
    for file in files {
        let kind = file.kind().ok_or_else(|| {
            SubmissionError::Validation(format!(
                "file type {} is not allowed: only PNG, JPEG, and PDF are accepted",
                file.content_type
            ))
        })?;
        if file.content.is_empty() {
            return Err(SubmissionError::Validation(format!(
                "file {} is empty",
                file.file_name
            )));
        }
        if file.content.len() > MAX_FILE_BYTES {
            return Err(SubmissionError::Validation(format!(
                "file {} exceeds the 3 MiB limit",
                file.file_name
            )));
        }
        match kind {
            FileKind::Image => image_count += 1,
            FileKind::PdfDocument => pdf_count += 1,
        }
    }

    for (kind, count) in [
        (FileKind::Image, image_count),
        (FileKind::PdfDocument, pdf_count),
    ] {
        if count > kind.max_per_submission() {
            return Err(SubmissionError::Validation(format!(
                "at most {} {} file(s) may be submitted per week",
                kind.max_per_submission(),
                kind.label()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, len: usize) -> UploadedFile {
        UploadedFile {
            content: vec![0u8; len],
            content_type: content_type.to_string(),
            file_name: "report.bin".to_string(),
        }
    }

    fn metadata(week: i32) -> SubmissionMetadata {
        SubmissionMetadata {
            user_id: Uuid::new_v4(),
            username: "jane".to_string(),
            department_id: None,
            week_number: week,
            notes: Vec::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn rejects_missing_week() {
        let err = validate(&metadata(0), &[file("image/png", 10)]).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn rejects_empty_file_set() {
        let err = validate(&metadata(1), &[]).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_media_type() {
        let err = validate(&metadata(1), &[file("image/gif", 10)]).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn rejects_second_pdf() {
        let files = vec![file("application/pdf", 10), file("application/pdf", 10)];
        let err = validate(&metadata(1), &files).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn rejects_fourth_image() {
        let files = vec![
            file("image/png", 10),
            file("image/jpeg", 10),
            file("image/png", 10),
            file("image/jpeg", 10),
        ];
        let err = validate(&metadata(1), &files).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn rejects_oversized_file() {
        let err = validate(&metadata(1), &[file("image/png", MAX_FILE_BYTES + 1)]).unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(_)));
    }

    #[test]
    fn accepts_full_valid_set() {
        let files = vec![
            file("application/pdf", 10),
            file("image/png", 10),
            file("image/jpeg", 10),
            file("image/png", MAX_FILE_BYTES),
        ];
        assert!(validate(&metadata(1), &files).is_ok());
    }
}
