//! HTTP handlers for weekly submissions.

use actix_multipart::Multipart;
use actix_web::{
    web::{self, Path, Query},
    HttpResponse, Responder,
};
use log::{debug, error, info};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::AppState;
use crate::ErrorResponse;

use super::consolidator::SubmissionError;
use super::models::SubmissionRecord;
use super::multipart::SubmissionMultipart;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub week_number: Option<i32>,
}

#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateSubmissionRequest {
    /// JSON-encoded submission metadata (user, week, notes, links).
    pub metadata: String,
    /// Up to one PDF part named `files` and up to three image parts named
    /// `images`.
    pub files: Vec<String>,
}

fn error_response(err: &SubmissionError) -> HttpResponse {
    match err {
        SubmissionError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(message))
        }
        SubmissionError::DuplicateWeek(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()))
        }
        SubmissionError::NotFound => {
            HttpResponse::NotFound().json(ErrorResponse::not_found("Submission not found."))
        }
        SubmissionError::Upload { .. } | SubmissionError::Cleanup { .. } => {
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&err.to_string()))
        }
        SubmissionError::Repository(_) => HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Failed to persist submission")),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Submission Service",
    post,
    path = "/submission",
    request_body(content = inline(CreateSubmissionRequest), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission created successfully", body = SubmissionRecord),
        (status = 400, description = "Invalid submission", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn create_submission(payload: Multipart, data: web::Data<AppState>) -> impl Responder {
    info!("Executing create_submission handler");
    let submission = match SubmissionMultipart::parse(payload).await {
        Ok(submission) => submission,
        Err(err) => {
            debug!("Rejected submission multipart: {err}");
            return err.into();
        }
    };

    match data.consolidator.submit(submission).await {
        Ok(record) => HttpResponse::Created().json(record),
        Err(err) => {
            error!("Submission failed: {err}");
            error_response(&err)
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Submission Service",
    get,
    path = "/submission",
    params(
        ("userId" = Uuid, Query, description = "User whose submissions to fetch"),
        ("weekNumber" = Option<i32>, Query, description = "Restrict to one completed week")
    ),
    responses(
        (status = 200, description = "Submissions for the user", body = [SubmissionRecord]),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn get_submissions(
    query: Query<SubmissionQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let result = match query.week_number {
        Some(week) => {
            data.consolidator
                .submissions_by_week(query.user_id, week)
                .await
        }
        None => data.consolidator.submissions_for_user(query.user_id).await,
    };

    match result {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => {
            error!("Failed to fetch submissions: {err}");
            error_response(&err)
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Submission Service",
    delete,
    path = "/submission/{submission_id}",
    params(
        ("submission_id" = Uuid, Path, description = "Submission record to delete")
    ),
    responses(
        (status = 200, description = "Submission deleted successfully"),
        (status = 404, description = "Submission not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    )
)]
pub async fn delete_submission(
    submission_id: Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .consolidator
        .delete_submission(submission_id.into_inner())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Submission deleted successfully!"
        })),
        Err(err) => {
            error!("Failed to delete submission: {err}");
            error_response(&err)
        }
    }
}
