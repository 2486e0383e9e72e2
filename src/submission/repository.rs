//! Persistence collaborator for submission records.
//!
//! The consolidator only sees this trait; the Postgres implementation lives in
//! `crate::db::submission` and tests substitute an in-memory double. The
//! conditional `create`/`append_week` contract is what closes the
//! two-writers-same-week race: the week number is added only if absent, and a
//! lost race reports `DuplicateWeek` instead of silently merging.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{SubmissionRecord, WeekUpdate};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("persistence error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A record for the user already exists; the caller should append instead.
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Updated,
    /// The week number was already in the completed set; nothing was written.
    DuplicateWeek,
    /// No record exists for the user.
    NoRecord,
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, RepositoryError>;

    async fn find_by_week(
        &self,
        user_id: Uuid,
        week_number: i32,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError>;

    /// Insert the record unless one already exists for the user.
    async fn create(&self, record: &SubmissionRecord) -> Result<CreateOutcome, RepositoryError>;

    /// Append one week's delta, provided the week is not yet completed.
    async fn append_week(
        &self,
        user_id: Uuid,
        update: &WeekUpdate,
    ) -> Result<AppendOutcome, RepositoryError>;

    /// Remove and return the record, if present.
    async fn delete_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError>;
}
