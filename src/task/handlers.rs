//! Weekly task-plan handlers.

use actix_web::{
    web::{self, Json, Query},
    HttpRequest, HttpResponse,
};
use log::{debug, error};

use crate::db::AppState;
use crate::user::middleware::validate_request_token;
use crate::ErrorResponse;

use super::models::{
    CreateTaskRequest, DeleteWeekRequest, Task, TaskQuery, UpdateWeekRequest, WeekQuery,
    WeeklyPlan,
};

#[utoipa::path(
    context_path = "/api",
    tag = "Task Service",
    post,
    path = "/task",
    request_body = Vec<CreateTaskRequest>,
    responses(
        (status = 201, description = "Task plans created", body = [Task]),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn add_tasks(
    state: web::Data<AppState>,
    body: Json<Vec<CreateTaskRequest>>,
) -> HttpResponse {
    if body.is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Request body must be a non-empty array of tasks"));
    }

    match state.insert_tasks(&body).await {
        Ok(tasks) => {
            for task in &tasks {
                state.task_cache.invalidate(&task.main_title).await;
            }
            HttpResponse::Created().json(tasks)
        }
        Err(e) => {
            error!("Failed to insert tasks: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error adding tasks"))
        }
    }
}

async fn load_task(state: &AppState, title: &str) -> Result<Option<Task>, sqlx::Error> {
    let key = title.to_lowercase();
    if let Some(task) = state.task_cache.get(&key).await {
        debug!("Serving task plan '{key}' from cache");
        return Ok(Some(task));
    }
    let task = state.get_task_by_title(&key).await?;
    if let Some(task) = &task {
        state.task_cache.insert(key, task.clone()).await;
    }
    Ok(task)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Task Service",
    put,
    path = "/task/update",
    request_body = UpdateWeekRequest,
    responses(
        (status = 200, description = "Week plan updated", body = Task),
        (status = 400, description = "Invalid week number", body = ErrorResponse),
        (status = 404, description = "Task plan not found", body = ErrorResponse)
    )
)]
pub async fn update_week(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Json<UpdateWeekRequest>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    let task = match load_task(&state, &body.title).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found")));
        }
        Err(e) => {
            error!("Failed to load task plan: {e}");
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error updating task")));
        }
    };

    let mut plans: Vec<WeeklyPlan> = task.weekly_plans.0.clone();
    let week_count = plans.len() as i32;
    if body.week_number < 1 || body.week_number > week_count {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
            "Invalid week number. Must be between 1 and {week_count}"
        ))));
    }

    let plan = &mut plans[(body.week_number - 1) as usize];
    if let Some(week_title) = &body.week_title {
        plan.week_title = week_title.clone();
    }
    if let Some(task_list) = &body.task_list {
        plan.task_list = task_list.clone();
    }

    match state.update_task_plans(task.id, &plans).await {
        Ok(Some(updated)) => {
            state.task_cache.invalidate(&updated.main_title).await;
            Ok(HttpResponse::Ok().json(updated))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found"))),
        Err(e) => {
            error!("Failed to update task plan: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error updating task")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Task Service",
    delete,
    path = "/task/delete",
    request_body = DeleteWeekRequest,
    responses(
        (status = 200, description = "Week plan removed", body = Task),
        (status = 400, description = "Invalid week number", body = ErrorResponse),
        (status = 404, description = "Task plan not found", body = ErrorResponse)
    )
)]
pub async fn delete_week(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Json<DeleteWeekRequest>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    let task = match load_task(&state, &body.title).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found")));
        }
        Err(e) => {
            error!("Failed to load task plan: {e}");
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error deleting task")));
        }
    };

    let mut plans: Vec<WeeklyPlan> = task.weekly_plans.0.clone();
    let week_count = plans.len() as i32;
    if body.week_number < 1 || body.week_number > week_count {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
            "Invalid week number. Must be between 1 and {week_count}"
        ))));
    }

    plans.remove((body.week_number - 1) as usize);

    match state.update_task_plans(task.id, &plans).await {
        Ok(Some(updated)) => {
            state.task_cache.invalidate(&updated.main_title).await;
            Ok(HttpResponse::Ok().json(updated))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::not_found("Task not found"))),
        Err(e) => {
            error!("Failed to delete week plan: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error deleting task")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Task Service",
    get,
    path = "/task",
    params(
        ("title" = String, Query, description = "Department task-plan title")
    ),
    responses(
        (status = 200, description = "The department's task plan", body = Task),
        (status = 404, description = "Task plan not found", body = ErrorResponse)
    )
)]
pub async fn get_department_tasks(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: Query<TaskQuery>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    match load_task(&state, &query.title).await {
        Ok(Some(task)) => Ok(HttpResponse::Ok().json(task)),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ErrorResponse::not_found("No tasks found for this department"))),
        Err(e) => {
            error!("Failed to fetch task plan: {e}");
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error retrieving tasks")))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Task Service",
    get,
    path = "/task/particularweek",
    params(
        ("title" = String, Query, description = "Department task-plan title"),
        ("weekNumber" = i32, Query, description = "Week to fetch")
    ),
    responses(
        (status = 200, description = "The week's plan", body = WeeklyPlan),
        (status = 404, description = "Task plan or week not found", body = ErrorResponse)
    )
)]
pub async fn get_week_tasks(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: Query<WeekQuery>,
) -> actix_web::Result<HttpResponse> {
    validate_request_token(&req)?;

    let task = match load_task(&state, &query.title).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ErrorResponse::not_found("No tasks found for this department")));
        }
        Err(e) => {
            error!("Failed to fetch task plan: {e}");
            return Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Error retrieving tasks")));
        }
    };

    let plan = task
        .weekly_plans
        .0
        .iter()
        .find(|plan| plan.week_number == query.week_number)
        .cloned();

    match plan {
        Some(plan) => Ok(HttpResponse::Ok().json(plan)),
        None => Ok(HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
            "No plan found for week {}",
            query.week_number
        )))),
    }
}
