//! Offer-letter and completion-certificate endpoints.
//!
//! Generation is idempotent per candidate email: an existing record with a
//! PDF is reported as already generated, a record without one is back-filled.

use actix_web::{
    web::{self, Json, Query},
    HttpResponse, Responder,
};
use log::{error, info};

use crate::db::{letter::LetterTable, AppState};
use crate::docgen::{
    CandidateDetails, CertificateDetails, CompletionCertificateGenerator, GeneratedDocument,
    Generator, GeneratorError, OfferLetterGenerator,
};
use crate::metrics::DOCUMENTS_GENERATED;
use crate::ErrorResponse;

use super::models::DownloadQuery;

/// Generate the offer letter for a freshly registered candidate and persist
/// it. Already-generated letters are left untouched.
pub async fn generate_and_store_offer_letter(
    state: &AppState,
    candidate: CandidateDetails,
) -> anyhow::Result<()> {
    let existing = state
        .get_letter_by_email(LetterTable::OfferLetters, &candidate.email)
        .await?;
    if existing.as_ref().is_some_and(|record| !record.pdf.is_empty()) {
        info!(
            "Offer letter already generated for {} ({})",
            candidate.name, candidate.email
        );
        return Ok(());
    }

    let for_render = candidate.clone();
    let document = web::block(move || OfferLetterGenerator::new().generate(for_render)).await??;
    DOCUMENTS_GENERATED.with_label_values(&["offer_letter"]).inc();

    match existing {
        Some(_) => {
            state
                .update_letter_pdf(LetterTable::OfferLetters, &candidate.email, &document.pdf)
                .await?;
        }
        None => {
            state
                .insert_letter(
                    LetterTable::OfferLetters,
                    &candidate.name,
                    &candidate.email,
                    &candidate.department_name,
                    candidate.tenure_months as i32,
                    candidate.start_date,
                    candidate.end_date,
                    &document.pdf,
                )
                .await?;
        }
    }

    info!(
        "Offer letter generated for {} ({})",
        candidate.name, candidate.email
    );
    Ok(())
}

fn generator_error_response(err: &GeneratorError) -> HttpResponse {
    match err {
        GeneratorError::MissingField(_) | GeneratorError::InvalidDateRange => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()))
        }
        GeneratorError::Render(_) => HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Document rendering failed")),
    }
}

fn pdf_attachment(filename: &str, pdf: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename={filename}"),
        ))
        .body(pdf)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificate Service",
    get,
    path = "/certificate/offerLetter",
    params(
        ("email" = String, Query, description = "Candidate email")
    ),
    responses(
        (status = 200, description = "The stored offer letter PDF", content_type = "application/pdf"),
        (status = 404, description = "Offer letter not found", body = ErrorResponse)
    )
)]
pub async fn download_offer_letter(
    state: web::Data<AppState>,
    query: Query<DownloadQuery>,
) -> impl Responder {
    match state
        .get_letter_by_email(LetterTable::OfferLetters, &query.email)
        .await
    {
        Ok(Some(record)) if !record.pdf.is_empty() => pdf_attachment(
            &format!("{}_Offer_Letter.pdf", record.name),
            record.pdf,
        ),
        Ok(_) => HttpResponse::NotFound().json(ErrorResponse::not_found("Offer letter not found")),
        Err(e) => {
            error!("Failed to fetch offer letter: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch offer letter"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificate Service",
    post,
    path = "/certificate/generateIcc",
    request_body = CertificateDetails,
    responses(
        (status = 200, description = "Certificate generated or already present"),
        (status = 400, description = "Invalid candidate data", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn generate_icc(
    state: web::Data<AppState>,
    body: Json<CertificateDetails>,
) -> impl Responder {
    let candidate = body.into_inner();
    if candidate.email.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Email is required"));
    }

    let existing = match state
        .get_letter_by_email(LetterTable::CompletionCertificates, &candidate.email)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            error!("Failed to look up certificate: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Certificate generation failed"));
        }
    };

    if existing.as_ref().is_some_and(|record| !record.pdf.is_empty()) {
        return HttpResponse::Ok().json(serde_json::json!({
            "message": format!(
                "ICC is already generated for this user: {} ({})",
                candidate.name, candidate.email
            )
        }));
    }

    let for_render = candidate.clone();
    let document: GeneratedDocument = match web::block(move || {
        CompletionCertificateGenerator::new().generate(for_render)
    })
    .await
    {
        Ok(Ok(document)) => document,
        Ok(Err(err)) => return generator_error_response(&err),
        Err(e) => {
            error!("Certificate rendering was cancelled: {e}");
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Certificate generation failed"));
        }
    };
    DOCUMENTS_GENERATED.with_label_values(&["certificate"]).inc();

    let persisted = match existing {
        Some(_) => state
            .update_letter_pdf(
                LetterTable::CompletionCertificates,
                &candidate.email,
                &document.pdf,
            )
            .await
            .map(|_| ()),
        None => state
            .insert_letter(
                LetterTable::CompletionCertificates,
                &candidate.name,
                &candidate.email,
                &candidate.department_name,
                3,
                candidate.start_date,
                candidate.end_date,
                &document.pdf,
            )
            .await
            .map(|_| ()),
    };

    match persisted {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "ICC letter generation successful"
        })),
        Err(e) => {
            error!("Failed to persist certificate: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Certificate generation failed"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificate Service",
    get,
    path = "/certificate/icc",
    params(
        ("email" = String, Query, description = "Candidate email")
    ),
    responses(
        (status = 200, description = "The stored certificate PDF", content_type = "application/pdf"),
        (status = 404, description = "Certificate not found", body = ErrorResponse)
    )
)]
pub async fn download_icc(
    state: web::Data<AppState>,
    query: Query<DownloadQuery>,
) -> impl Responder {
    match state
        .get_letter_by_email(LetterTable::CompletionCertificates, &query.email)
        .await
    {
        Ok(Some(record)) if !record.pdf.is_empty() => pdf_attachment(
            &format!("{}_Internship_Completion_Certificate.pdf", record.name),
            record.pdf,
        ),
        Ok(_) => HttpResponse::NotFound().json(ErrorResponse::not_found("ICC not found")),
        Err(e) => {
            error!("Failed to fetch certificate: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch certificate"))
        }
    }
}
