//! Postgres implementation of the submission repository.
//!
//! `completed_weeks`, `links` and `notes` are Postgres arrays; the stored file
//! references are JSONB. The append is a single conditional UPDATE so two
//! concurrent submissions for the same week cannot both pass the
//! duplicate-week check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::media::StoredFileReference;
use crate::submission::{
    AppendOutcome, CreateOutcome, RepositoryError, SubmissionRecord, SubmissionRepository,
    WeekUpdate,
};

const SELECT_COLUMNS: &str = "id, user_id, username, department_id, completed_weeks, \
     images, pdfs, links, notes, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    department_id: Option<Uuid>,
    completed_weeks: Vec<i32>,
    images: Json<Vec<StoredFileReference>>,
    pdfs: Json<Vec<StoredFileReference>>,
    links: Vec<String>,
    notes: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubmissionRow> for SubmissionRecord {
    fn from(row: SubmissionRow) -> Self {
        SubmissionRecord {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            department_id: row.department_id,
            completed_weeks: row.completed_weeks,
            images: row.images.0,
            pdfs: row.pdfs.0,
            links: row.links,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SubmissionRecord::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SubmissionRecord::from))
    }

    async fn find_by_week(
        &self,
        user_id: Uuid,
        week_number: i32,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM submissions \
             WHERE user_id = $1 AND completed_weeks @> ARRAY[$2]"
        ))
        .bind(user_id)
        .bind(week_number)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(SubmissionRecord::from).collect())
    }

    async fn create(&self, record: &SubmissionRecord) -> Result<CreateOutcome, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO submissions
                (id, user_id, username, department_id, completed_weeks,
                 images, pdfs, links, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.username)
        .bind(record.department_id)
        .bind(&record.completed_weeks)
        .bind(Json(&record.images))
        .bind(Json(&record.pdfs))
        .bind(&record.links)
        .bind(&record.notes)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(CreateOutcome::AlreadyExists)
        } else {
            Ok(CreateOutcome::Created)
        }
    }

    async fn append_week(
        &self,
        user_id: Uuid,
        update: &WeekUpdate,
    ) -> Result<AppendOutcome, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE submissions
            SET completed_weeks = array_append(completed_weeks, $2),
                images = images || $3,
                pdfs = pdfs || $4,
                links = links || $5,
                notes = notes || $6,
                updated_at = NOW()
            WHERE user_id = $1 AND NOT (completed_weeks @> ARRAY[$2])
            "#,
        )
        .bind(user_id)
        .bind(update.week_number)
        .bind(Json(&update.images))
        .bind(Json(&update.pdfs))
        .bind(&update.links)
        .bind(&update.notes)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(AppendOutcome::Updated);
        }

        let exists =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM submissions WHERE user_id = $1) AS present")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?
                .get::<bool, _>("present");

        if exists {
            Ok(AppendOutcome::DuplicateWeek)
        } else {
            Ok(AppendOutcome::NoRecord)
        }
    }

    async fn delete_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "DELETE FROM submissions WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SubmissionRecord::from))
    }
}
