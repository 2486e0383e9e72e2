//! Department database operations

use uuid::Uuid;

use super::AppState;
use crate::department::models::{Department, UpdateDepartmentRequest};

const DEPARTMENT_COLUMNS: &str =
    "id, name, task_id, project_overview_id, created_at, updated_at";

impl AppState {
    pub async fn insert_department(&self, name: &str) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(&format!(
            "INSERT INTO departments (id, name) VALUES ($1, $2) RETURNING {DEPARTMENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_all_departments(&self) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_department(
        &self,
        request: &UpdateDepartmentRequest,
    ) -> Result<Option<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(&format!(
            r#"
            UPDATE departments
            SET name = COALESCE($2, name),
                task_id = COALESCE($3, task_id),
                project_overview_id = COALESCE($4, project_overview_id),
                updated_at = NOW()
            WHERE name = $1
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(request.new_name.as_deref())
        .bind(request.task_id)
        .bind(request.project_overview_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_department(&self, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
