//! Department CRUD handlers. Reads are served from the moka cache.

use actix_web::{
    web::{self, Json, Query},
    HttpRequest, HttpResponse,
};
use log::{debug, error, info};

use crate::db::AppState;
use crate::user::middleware::validate_request_token;
use crate::ErrorResponse;

use super::models::{
    CreateDepartmentRequest, Department, DepartmentQuery, UpdateDepartmentRequest,
};

const CACHE_KEY: &str = "all";

#[utoipa::path(
    context_path = "/api",
    tag = "Department Service",
    post,
    path = "/department",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn add_department(
    state: web::Data<AppState>,
    body: Json<CreateDepartmentRequest>,
) -> HttpResponse {
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Department name is required"));
    }

    match state.insert_department(body.name.trim()).await {
        Ok(department) => {
            info!("Department '{}' created", department.name);
            state.department_cache.invalidate(CACHE_KEY).await;
            HttpResponse::Created().json(department)
        }
        Err(e) => {
            error!("Failed to insert department: {e}");
            HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Failed to create department"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Department Service",
    get,
    path = "/department",
    responses(
        (status = 200, description = "All departments", body = [Department]),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn get_departments(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    if let Some(departments) = state.department_cache.get(CACHE_KEY).await {
        debug!("Serving departments from cache");
        return Ok(HttpResponse::Ok().json(departments));
    }

    match state.get_all_departments().await {
        Ok(departments) => {
            state
                .department_cache
                .insert(CACHE_KEY.to_string(), departments.clone())
                .await;
            Ok(HttpResponse::Ok().json(departments))
        }
        Err(e) => {
            error!("Failed to fetch departments: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch departments")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Department Service",
    put,
    path = "/department",
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 404, description = "Department not found", body = ErrorResponse)
    )
)]
pub async fn update_department(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Json<UpdateDepartmentRequest>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    match state.update_department(&body).await {
        Ok(Some(department)) => {
            state.department_cache.invalidate(CACHE_KEY).await;
            Ok(HttpResponse::Ok().json(department))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Department not found")))
        }
        Err(e) => {
            error!("Failed to update department: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to update department")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Department Service",
    delete,
    path = "/department",
    params(
        ("name" = String, Query, description = "Department name to delete")
    ),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 404, description = "Department not found", body = ErrorResponse)
    )
)]
pub async fn delete_department(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: Query<DepartmentQuery>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    match state.delete_department(&query.name).await {
        Ok(true) => {
            state.department_cache.invalidate(CACHE_KEY).await;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "Department deleted successfully"
            })))
        }
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Department not found")))
        }
        Err(e) => {
            error!("Failed to delete department: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to delete department")))
        }
    }
}
