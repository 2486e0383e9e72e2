//! Project-overview CRUD handlers.

use actix_web::{
    web::{self, Json, Query},
    HttpResponse, Responder,
};
use log::error;

use crate::db::AppState;
use crate::ErrorResponse;

use super::models::{
    CreateProjectRequest, ProjectOverview, ProjectQuery, UpdateProjectRequest,
    INTERNSHIP_DURATIONS, INTERNSHIP_TYPES,
};

fn validate_type_and_duration(
    internship_type: Option<&str>,
    duration: Option<i32>,
) -> Result<(), String> {
    if let Some(kind) = internship_type {
        if !INTERNSHIP_TYPES.contains(&kind) {
            return Err(format!("internshipType must be one of {INTERNSHIP_TYPES:?}"));
        }
    }
    if let Some(duration) = duration {
        if !INTERNSHIP_DURATIONS.contains(&duration) {
            return Err(format!("duration must be one of {INTERNSHIP_DURATIONS:?}"));
        }
    }
    Ok(())
}

#[utoipa::path(
    context_path = "/api",
    tag = "Project Service",
    post,
    path = "/project",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectOverview),
        (status = 400, description = "Required fields missing", body = ErrorResponse)
    )
)]
pub async fn add_project(
    state: web::Data<AppState>,
    body: Json<CreateProjectRequest>,
) -> impl Responder {
    if body.department_name.trim().is_empty()
        || body.overview.trim().is_empty()
        || body.procedure.is_empty()
    {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Required fields missing"));
    }
    if let Err(message) =
        validate_type_and_duration(body.internship_type.as_deref(), body.duration)
    {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    match state.insert_project(&body).await {
        Ok(project) => HttpResponse::Created().json(project),
        Err(e) => {
            error!("Failed to insert project: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Server error"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Project Service",
    get,
    path = "/project",
    params(
        ("overview" = String, Query, description = "Overview text identifying the project")
    ),
    responses(
        (status = 200, description = "Project found", body = ProjectOverview),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn get_project(
    state: web::Data<AppState>,
    query: Query<ProjectQuery>,
) -> impl Responder {
    match state.get_project_by_overview(&query.overview).await {
        Ok(Some(project)) => HttpResponse::Ok().json(project),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::not_found("Project not found")),
        Err(e) => {
            error!("Failed to fetch project: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Server error"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Project Service",
    put,
    path = "/project",
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectOverview),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn update_project(
    state: web::Data<AppState>,
    body: Json<UpdateProjectRequest>,
) -> impl Responder {
    if body.overview.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Overview is required"));
    }
    if let Err(message) =
        validate_type_and_duration(body.internship_type.as_deref(), body.duration)
    {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message));
    }

    match state.update_project_by_overview(&body).await {
        Ok(Some(project)) => HttpResponse::Ok().json(project),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::not_found("Project not found")),
        Err(e) => {
            error!("Failed to update project: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Server error"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Project Service",
    delete,
    path = "/project",
    params(
        ("overview" = String, Query, description = "Overview text identifying the project")
    ),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn delete_project(
    state: web::Data<AppState>,
    query: Query<ProjectQuery>,
) -> impl Responder {
    match state.delete_project_by_overview(&query.overview).await {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Project deleted successfully"
        })),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::not_found("Project not found")),
        Err(e) => {
            error!("Failed to delete project: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error("Server error"))
        }
    }
}
