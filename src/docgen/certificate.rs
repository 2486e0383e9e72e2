//! Generator for the internship completion certificate.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use super::common::{
    format_display_date, sanitize_filename, CompanyDetails, COLOR_PRIMARY, COLOR_SECONDARY,
    COLOR_TEXT,
};
use super::renderer::{Align, FontStyle, PageConfig, PdfRenderer, TextBlock};
use super::traits::{Generator, Validator};
use super::{GeneratedDocument, GeneratorError};

const FONT_SIZE_TITLE: f32 = 28.0;
const FONT_SIZE_SUBTITLE: f32 = 16.0;
const FONT_SIZE_BODY: f32 = 12.0;
const FONT_SIZE_SMALL: f32 = 10.0;

/// Candidate fields substituted into the certificate template.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDetails {
    pub name: String,
    pub email: String,
    #[serde(rename = "department", alias = "departmentName")]
    pub department_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Validator for CertificateDetails {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.name.trim().is_empty() {
            return Err(GeneratorError::MissingField("name"));
        }
        if self.department_name.trim().is_empty() {
            return Err(GeneratorError::MissingField("department"));
        }
        if self.end_date <= self.start_date {
            return Err(GeneratorError::InvalidDateRange);
        }
        Ok(())
    }
}

/// Composes the single-section certificate body and renders it.
pub struct CompletionCertificateGenerator {
    company: CompanyDetails,
}

impl CompletionCertificateGenerator {
    pub fn new() -> Self {
        Self {
            company: CompanyDetails::default(),
        }
    }

    pub fn with_company(company: CompanyDetails) -> Self {
        Self { company }
    }

    pub fn generate_on(
        &self,
        candidate: &CertificateDetails,
        issued_on: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        candidate.validate()?;

        let blocks = self.compose(candidate);
        let pdf = PdfRenderer::render(&PageConfig::a4(), &blocks)?;
        let filename = format!(
            "{}-completion-certificate.pdf",
            sanitize_filename(&candidate.name, "candidate")
        );

        Ok(GeneratedDocument {
            filename,
            pdf,
            issued_on,
        })
    }

    fn compose(&self, candidate: &CertificateDetails) -> Vec<TextBlock> {
        let company = &self.company;
        let body = format!(
            "This is to certify that {name} has successfully completed their internship in the \
             {department} department at {company} from {start} to {end}.\n\
             \n\
             During this internship, they demonstrated exceptional dedication and professionalism, \
             contributing significantly to the projects and learning opportunities offered. Their \
             efforts and accomplishments have been an integral part of our organization's goals.\n\
             \n\
             We wish {name} all the best for their future endeavors and look forward to witnessing \
             their continued success.",
            name = candidate.name,
            department = candidate.department_name,
            company = company.name,
            start = format_display_date(candidate.start_date),
            end = format_display_date(candidate.end_date),
        );

        vec![
            TextBlock::new(
                "Internship Completion Certificate",
                FontStyle::Bold,
                FONT_SIZE_TITLE,
            )
            .color(COLOR_PRIMARY)
            .align(Align::Center)
            .space_after(FONT_SIZE_BODY * 2.0),
            TextBlock::new(body, FontStyle::Regular, FONT_SIZE_BODY)
                .align(Align::Justify)
                .line_gap(5.0)
                .space_after(FONT_SIZE_BODY * 2.0),
            TextBlock::new(
                format!("Issued by {}", company.name),
                FontStyle::Bold,
                FONT_SIZE_SUBTITLE,
            )
            .color(COLOR_SECONDARY)
            .align(Align::Center)
            .space_after(FONT_SIZE_BODY * 2.0),
            TextBlock::new(
                format!("{} | {}", company.name, company.address),
                FontStyle::Regular,
                FONT_SIZE_SMALL,
            )
            .color(COLOR_TEXT)
            .align(Align::Center),
            TextBlock::new(
                format!("Contact: {} | Email: {}", company.contact_number, company.email),
                FontStyle::Regular,
                FONT_SIZE_SMALL,
            )
            .align(Align::Center),
            TextBlock::new(
                format!("Website: {}", company.website),
                FontStyle::Regular,
                FONT_SIZE_SMALL,
            )
            .align(Align::Center)
            .link(format!("https://{}", company.website)),
        ]
    }
}

impl Default for CompletionCertificateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<CertificateDetails> for CompletionCertificateGenerator {
    fn generate(&self, request: CertificateDetails) -> Result<GeneratedDocument, GeneratorError> {
        self.generate_on(&request, Utc::now().date_naive())
    }
}
