//! Weekly submissions: validation, media-host fan-out, and append-only record
//! consolidation.

pub mod consolidator;
pub mod handlers;
pub mod models;
pub mod multipart;
pub mod repository;

pub use consolidator::{SubmissionConsolidator, SubmissionError};
pub use models::{
    FileKind, NewSubmission, SubmissionMetadata, SubmissionRecord, UploadedFile, WeekUpdate,
};
pub use repository::{AppendOutcome, CreateOutcome, RepositoryError, SubmissionRepository};
