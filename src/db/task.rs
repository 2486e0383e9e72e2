//! Weekly task-plan database operations

use sqlx::types::Json;
use uuid::Uuid;

use super::AppState;
use crate::task::models::{CreateTaskRequest, Task, WeeklyPlan};

const TASK_COLUMNS: &str =
    "id, main_title, overview, department_name, weekly_plans, created_at, updated_at";

impl AppState {
    pub async fn insert_tasks(
        &self,
        requests: &[CreateTaskRequest],
    ) -> Result<Vec<Task>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(requests.len());

        for request in requests {
            let task = sqlx::query_as::<_, Task>(&format!(
                r#"
                INSERT INTO tasks (id, main_title, overview, department_name, weekly_plans)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {TASK_COLUMNS}
                "#
            ))
            .bind(Uuid::new_v4())
            .bind(request.main_title.to_lowercase())
            .bind(request.overview.as_deref())
            .bind(request.department_name.as_deref())
            .bind(Json(&request.weekly_plans))
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(task);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn get_task_by_title(&self, title: &str) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE main_title = $1"
        ))
        .bind(title.to_lowercase())
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_task_plans(
        &self,
        task_id: Uuid,
        weekly_plans: &[WeeklyPlan],
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET weekly_plans = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task_id)
        .bind(Json(weekly_plans))
        .fetch_optional(&self.pool)
        .await
    }
}
