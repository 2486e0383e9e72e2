//! User account database operations

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::AppState;
use crate::user::models::{RegisterRequest, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, phone_number, college, city, state, \
     department_name, department_id, start_date, end_date, reset_token, reset_token_expiry, \
     created_at, updated_at";

impl AppState {
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_user(
        &self,
        request: &RegisterRequest,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let department_id = self
            .get_department_by_name(&request.department_name)
            .await?
            .map(|department| department.id);

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users
                (id, name, email, password_hash, phone_number, college, city, state,
                 department_name, department_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.email.to_lowercase())
        .bind(password_hash)
        .bind(&request.phone_number)
        .bind(&request.college)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.department_name)
        .bind(department_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_user_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET reset_token = $1, reset_token_expiry = $2, updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(token)
        .bind(expiry)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear_reset_token(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET reset_token = NULL, reset_token_expiry = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
