//! Project-overview database operations

use uuid::Uuid;

use super::AppState;
use crate::project::models::{CreateProjectRequest, ProjectOverview, UpdateProjectRequest};

const PROJECT_COLUMNS: &str = "id, department_name, overview, internship_type, duration, \
     start_date, end_date, project_deadline, procedure, created_at, updated_at";

impl AppState {
    pub async fn insert_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectOverview, sqlx::Error> {
        sqlx::query_as::<_, ProjectOverview>(&format!(
            r#"
            INSERT INTO project_overviews
                (id, department_name, overview, internship_type, duration,
                 start_date, end_date, project_deadline, procedure)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&request.department_name)
        .bind(&request.overview)
        .bind(request.internship_type.as_deref().unwrap_or("Unpaid"))
        .bind(request.duration.unwrap_or(3))
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.project_deadline)
        .bind(&request.procedure)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_project_by_overview(
        &self,
        overview: &str,
    ) -> Result<Option<ProjectOverview>, sqlx::Error> {
        sqlx::query_as::<_, ProjectOverview>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM project_overviews WHERE overview = $1"
        ))
        .bind(overview)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_project_by_overview(
        &self,
        request: &UpdateProjectRequest,
    ) -> Result<Option<ProjectOverview>, sqlx::Error> {
        sqlx::query_as::<_, ProjectOverview>(&format!(
            r#"
            UPDATE project_overviews
            SET department_name = COALESCE($2, department_name),
                internship_type = COALESCE($3, internship_type),
                duration = COALESCE($4, duration),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                project_deadline = COALESCE($7, project_deadline),
                procedure = COALESCE($8, procedure),
                updated_at = NOW()
            WHERE overview = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&request.overview)
        .bind(request.department_name.as_deref())
        .bind(request.internship_type.as_deref())
        .bind(request.duration)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.project_deadline)
        .bind(request.procedure.as_deref())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_project_by_overview(&self, overview: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_overviews WHERE overview = $1")
            .bind(overview)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
