//! Document generation - business logic for producing the internship PDFs.
//!
//! This module contains specialized generators for each document type:
//! - `OfferLetter` - the online internship offer letter
//! - `CompletionCertificate` - the internship completion certificate
//!
//! Both compose styled text blocks and hand them to the in-memory renderer.

pub mod certificate;
pub mod common;
pub mod metrics;
pub mod offer_letter;
pub mod renderer;
pub mod traits;

pub use certificate::{CertificateDetails, CompletionCertificateGenerator};
pub use offer_letter::{CandidateDetails, OfferLetterGenerator};
pub use renderer::{Align, FontStyle, PageConfig, PdfRenderer, RenderError, TextBlock};
pub use traits::{Generator, Validator};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("end date must fall after start date")]
    InvalidDateRange,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub issued_on: NaiveDate,
}
