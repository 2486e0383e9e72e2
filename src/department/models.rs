use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Internship department, optionally linked to its task plan and project
/// overview.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    #[schema(example = "Web Development")]
    pub name: String,
    pub task_id: Option<Uuid>,
    pub project_overview_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDepartmentRequest {
    #[schema(example = "Web Development")]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    /// Current department name.
    pub name: String,
    pub new_name: Option<String>,
    pub task_id: Option<Uuid>,
    pub project_overview_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DepartmentQuery {
    pub name: String,
}
