//! Generator and renderer tests. Text assertions run against the text
//! extracted from the produced PDF buffers.

use chrono::NaiveDate;

use renu_internship_server::docgen::{
    Align, CandidateDetails, CertificateDetails, CompletionCertificateGenerator, FontStyle,
    GeneratorError, OfferLetterGenerator, PageConfig, PdfRenderer, RenderError, TextBlock,
};

fn candidate() -> CandidateDetails {
    CandidateDetails {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        department_name: "Web Development".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
        tenure_months: 3,
    }
}

/// Extract the document text with line breaks collapsed, so assertions do not
/// depend on where the layout engine happened to wrap.
fn extract_text(pdf: &[u8]) -> String {
    pdf_extract::extract_text_from_mem(pdf)
        .expect("produced PDF must be extractable")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn offer_letter_contains_the_candidate_fields_verbatim() {
    let issued_on = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
    let document = OfferLetterGenerator::new()
        .generate_on(&candidate(), issued_on)
        .expect("offer letter generation must succeed");

    assert!(!document.pdf.is_empty());
    assert_eq!(document.filename, "jane-doe-internship-offer.pdf");

    let text = extract_text(&document.pdf);
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Web Development"));
    assert!(text.contains("5 January 2026"));
    assert!(text.contains("5 April 2026"));
    assert!(text.contains("3 months"));
    assert!(text.contains("100% Remote/Online"));
    assert!(text.contains("20 December 2025"));
}

#[test]
fn offer_letter_requires_a_name() {
    let mut request = candidate();
    request.name = String::new();

    let err = OfferLetterGenerator::new()
        .generate_on(&request, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap())
        .expect_err("blank name must be rejected");
    assert!(matches!(err, GeneratorError::MissingField("name")));
}

#[test]
fn offer_letter_requires_an_email() {
    let mut request = candidate();
    request.email = "  ".to_string();

    let err = OfferLetterGenerator::new()
        .generate_on(&request, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap())
        .expect_err("blank email must be rejected");
    assert!(matches!(err, GeneratorError::MissingField("email")));
}

#[test]
fn offer_letter_rejects_inverted_date_range() {
    let mut request = candidate();
    request.end_date = request.start_date;

    let err = OfferLetterGenerator::new()
        .generate_on(&request, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap())
        .expect_err("equal start and end dates must be rejected");
    assert!(matches!(err, GeneratorError::InvalidDateRange));
}

#[test]
fn certificate_contains_the_candidate_fields_verbatim() {
    let request = CertificateDetails {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        department_name: "Web Development".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
    };

    let document = CompletionCertificateGenerator::new()
        .generate_on(&request, NaiveDate::from_ymd_opt(2026, 4, 6).unwrap())
        .expect("certificate generation must succeed");

    assert!(!document.pdf.is_empty());
    let text = extract_text(&document.pdf);
    assert!(text.contains("Internship Completion Certificate"));
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Web Development"));
    assert!(text.contains("5 January 2026"));
    assert!(text.contains("5 April 2026"));
}

#[test]
fn certificate_requires_a_department() {
    let request = CertificateDetails {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        department_name: String::new(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 4, 5).unwrap(),
    };

    let err = CompletionCertificateGenerator::new()
        .generate_on(&request, NaiveDate::from_ymd_opt(2026, 4, 6).unwrap())
        .expect_err("blank department must be rejected");
    assert!(matches!(err, GeneratorError::MissingField("department")));
}

#[test]
fn renderer_rejects_blank_blocks() {
    let blocks = vec![TextBlock::new("   ", FontStyle::Regular, 12.0)];
    let err = PdfRenderer::render(&PageConfig::a4(), &blocks)
        .expect_err("blank block must be rejected");
    assert!(matches!(err, RenderError::EmptyBlock));
}

#[test]
fn renderer_rejects_non_positive_font_sizes() {
    let blocks = vec![TextBlock::new("hello", FontStyle::Regular, 0.0)];
    let err = PdfRenderer::render(&PageConfig::a4(), &blocks)
        .expect_err("zero font size must be rejected");
    assert!(matches!(err, RenderError::InvalidFontSize(_)));
}

#[test]
fn renderer_supports_every_alignment() {
    let blocks = vec![
        TextBlock::new("left aligned text", FontStyle::Regular, 12.0),
        TextBlock::new("centered text", FontStyle::Bold, 12.0).align(Align::Center),
        TextBlock::new("right aligned text", FontStyle::Oblique, 12.0).align(Align::Right),
        TextBlock::new(
            "justified body copy that is long enough to wrap onto several lines when rendered \
             inside the default page margins of an A4 document, exercising the word-spacing \
             path of the layout engine",
            FontStyle::Regular,
            12.0,
        )
        .align(Align::Justify),
    ];

    let pdf = PdfRenderer::render(&PageConfig::a4(), &blocks).expect("render must succeed");
    let text = extract_text(&pdf);
    assert!(text.contains("left aligned text"));
    assert!(text.contains("centered text"));
    assert!(text.contains("right aligned text"));
    assert!(text.contains("justified"));
}

#[test]
fn renderer_flows_long_content_across_pages() {
    let paragraph = "A steady stream of report content that keeps flowing down the page. ";
    let long_text = paragraph.repeat(200);
    let blocks = vec![TextBlock::new(long_text, FontStyle::Regular, 12.0)];

    let pdf = PdfRenderer::render(&PageConfig::a4(), &blocks).expect("render must succeed");
    let text = extract_text(&pdf);
    assert!(text.matches("steady stream").count() >= 200);
}

#[test]
fn renderer_links_do_not_break_the_document() {
    let blocks = vec![
        TextBlock::new("Website: www.rshefoundation.org", FontStyle::Regular, 10.0)
            .align(Align::Center)
            .link("https://www.rshefoundation.org"),
    ];

    let pdf = PdfRenderer::render(&PageConfig::a4(), &blocks).expect("render must succeed");
    assert!(extract_text(&pdf).contains("www.rshefoundation.org"));
}
