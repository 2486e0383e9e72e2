//! Generator for the online internship offer letter.

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

const FONT_SIZE_TITLE: f32 = 22.0;
const FONT_SIZE_SUBTITLE: f32 = 16.0;
const FONT_SIZE_BODY: f32 = 12.0;
const FONT_SIZE_SMALL: f32 = 10.0;

fn default_tenure() -> u32 {
    1
}

/// Candidate fields substituted into the offer-letter template.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetails {
    pub name: String,
    pub email: String,
    pub department_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "tenure", default = "default_tenure")]
    pub tenure_months: u32,
}

impl Validator for CandidateDetails {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.name.trim().is_empty() {
            return Err(GeneratorError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(GeneratorError::MissingField("email"));
        }
        if self.end_date <= self.start_date {
            return Err(GeneratorError::InvalidDateRange);
        }
        Ok(())
    }
}

/// Composes the fixed offer-letter template and renders it.
pub struct OfferLetterGenerator {
    company: CompanyDetails,
}

impl OfferLetterGenerator {
    pub fn new() -> Self {
        Self {
            company: CompanyDetails::default(),
        }
    }

    pub fn with_company(company: CompanyDetails) -> Self {
        Self { company }
    }

    /// Render the letter with an explicit issue date.
    pub fn generate_on(
        &self,
        candidate: &CandidateDetails,
        issued_on: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        candidate.validate()?;

        let blocks = self.compose(candidate, issued_on);
        let pdf = PdfRenderer::render(&PageConfig::a4(), &blocks)?;
        let filename = format!(
            "{}-internship-offer.pdf",
            sanitize_filename(&candidate.name, "candidate")
        );

        Ok(GeneratedDocument {
            filename,
            pdf,
            issued_on,
        })
    }

    fn compose(&self, candidate: &CandidateDetails, issued_on: NaiveDate) -> Vec<TextBlock> {
        let company = &self.company;
        let main_content = format!(
            "We are excited to extend an official online internship offer to you at {company}.\n\
             \n\
             After a thorough review of your application and impressive qualifications, we are \
             delighted to welcome you to our virtual internship program. Your exceptional academic \
             background and demonstrated skills perfectly align with our organizational mission of \
             healthcare education and innovation.\n\
             \n\
             Internship Details:\n\
             \u{2022} Department: {department}\n\
             \u{2022} Start Date: {start}\n\
             \u{2022} End Date: {end}\n\
             \u{2022} Duration: {tenure} months\n\
             \u{2022} Internship Type: 100% Remote/Online\n\
             \n\
             Key Learning Opportunities:\n\
             \u{2022} Comprehensive project-based learning\n\
             \u{2022} Direct mentorship from industry experts\n\
             \u{2022} Exposure to real-world healthcare education challenges\n\
             \u{2022} Opportunity to contribute to meaningful research and initiatives\n\
             \u{2022} Professional skill development workshops\n\
             \u{2022} Certificate of completion upon successful internship\n\
             \n\
             This offer is contingent upon:\n\
             1. Submission of required academic and personal documents\n\
             2. Completion of a virtual orientation session\n\
             3. Adherence to our internship code of conduct\n\
             4. Maintaining satisfactory academic performance\n\
             5. Signing the internship agreement",
            company = company.name,
            department = candidate.department_name,
            start = format_display_date(candidate.start_date),
            end = format_display_date(candidate.end_date),
            tenure = candidate.tenure_months,
        );

        let learning_objectives = "During this internship, you will:\n\
             \u{2022} Gain hands-on experience in your field of study\n\
             \u{2022} Develop professional skills relevant to healthcare education\n\
             \u{2022} Work on innovative projects\n\
             \u{2022} Build a strong professional network\n\
             \u{2022} Create a portfolio of impactful work\n\
             \u{2022} Receive guidance from experienced mentors";

        let expectations = "Internship Expectations:\n\
             \u{2022} Commitment to 15-20 hours per week\n\
             \u{2022} Participation in weekly virtual team meetings\n\
             \u{2022} Timely completion of assigned projects\n\
             \u{2022} Maintain professional communication\n\
             \u{2022} Submit weekly progress reports\n\
             \u{2022} Engage in continuous learning and skill development";

        let closing_content = "To accept this internship offer, please:\n\
             1. Review the attached internship agreement\n\
             2. Complete the online onboarding form within 5 business days\n\
             3. Submit required documents electronically\n\
             4. Confirm your participation via email\n\
             5. Attend the mandatory virtual orientation\n\
             \n\
             Our internship coordination team is available to address any questions or concerns. \
             We recommend scheduling a virtual information session to discuss your internship \
             journey.";

        let legal_disclaimer = format!(
            "This internship offer is made in good faith and is subject to the terms outlined in \
             the internship agreement. {} reserves the right to modify or withdraw the offer if \
             any information is found to be incorrect or misrepresented.",
            company.name
        );

        let final_message = "We are thrilled to support your professional growth and look forward \
             to your contributions to healthcare education. This is the beginning of an exciting \
             learning journey!";

        vec![
            TextBlock::new(&company.name, FontStyle::Bold, FONT_SIZE_TITLE)
                .color(COLOR_PRIMARY)
                .align(Align::Center)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new(
                format!("Date: {}", format_display_date(issued_on)),
                FontStyle::Regular,
                FONT_SIZE_BODY,
            )
            .align(Align::Right)
            .space_after(FONT_SIZE_BODY),
            TextBlock::new("Online Internship Offer", FontStyle::Bold, FONT_SIZE_SUBTITLE)
                .align(Align::Center)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new(
                format!("Congratulations, {}!", candidate.name),
                FontStyle::Regular,
                FONT_SIZE_BODY,
            )
            .space_after(FONT_SIZE_BODY),
            TextBlock::new(main_content, FontStyle::Regular, FONT_SIZE_BODY)
                .line_gap(5.0)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new("Learning Objectives:", FontStyle::Bold, FONT_SIZE_BODY),
            TextBlock::new(learning_objectives, FontStyle::Regular, FONT_SIZE_BODY)
                .line_gap(3.0)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new("Internship Expectations:", FontStyle::Bold, FONT_SIZE_BODY),
            TextBlock::new(expectations, FontStyle::Regular, FONT_SIZE_BODY)
                .line_gap(3.0)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new("Next Steps:", FontStyle::Bold, FONT_SIZE_BODY),
            TextBlock::new(closing_content, FontStyle::Regular, FONT_SIZE_BODY)
                .line_gap(3.0)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new(legal_disclaimer, FontStyle::Oblique, FONT_SIZE_SMALL)
                .line_gap(2.0)
                .space_after(FONT_SIZE_BODY),
            TextBlock::new(final_message, FontStyle::Bold, FONT_SIZE_BODY)
                .color(COLOR_SECONDARY)
                .align(Align::Center)
                .line_gap(3.0)
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

impl Default for OfferLetterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<CandidateDetails> for OfferLetterGenerator {
    fn generate(&self, request: CandidateDetails) -> Result<GeneratedDocument, GeneratorError> {
        self.generate_on(&request, Utc::now().date_naive())
    }
}
