use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Project overview shown to interns of a department.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub id: Uuid,
    pub department_name: String,
    pub overview: String,
    /// "Paid" or "Unpaid".
    #[schema(example = "Unpaid")]
    pub internship_type: String,
    /// Internship length in months (3 or 6).
    pub duration: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub project_deadline: NaiveDate,
    pub procedure: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub department_name: String,
    pub overview: String,
    pub procedure: Vec<String>,
    #[serde(default)]
    pub internship_type: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub project_deadline: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// Overview text identifying the project to update.
    pub overview: String,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub internship_type: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub procedure: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProjectQuery {
    pub overview: String,
}

pub const INTERNSHIP_TYPES: [&str; 2] = ["Paid", "Unpaid"];
pub const INTERNSHIP_DURATIONS: [i32; 2] = [3, 6];
