use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// A labelled attribute attached to a task item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskAttribute {
    pub label: String,
    #[serde(default)]
    pub task_description: Option<String>,
}

/// One assignable task inside a week's plan.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub task_title: String,
    #[serde(default)]
    pub task_description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<TaskAttribute>,
}

/// The plan for a single internship week.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub week_number: i32,
    pub week_title: String,
    #[serde(default)]
    pub task_list: Vec<TaskItem>,
}

/// A department's task plan across all internship weeks.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub main_title: String,
    pub overview: Option<String>,
    pub department_name: Option<String>,
    #[schema(value_type = Vec<WeeklyPlan>)]
    pub weekly_plans: Json<Vec<WeeklyPlan>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub main_title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub weekly_plans: Vec<WeeklyPlan>,
}

/// Replaces parts of one week's plan.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeekRequest {
    pub title: String,
    pub week_number: i32,
    #[serde(default)]
    pub week_title: Option<String>,
    #[serde(default)]
    pub task_list: Option<Vec<TaskItem>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWeekRequest {
    pub title: String,
    pub week_number: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskQuery {
    pub title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekQuery {
    pub title: String,
    pub week_number: i32,
}
