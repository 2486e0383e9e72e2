use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A generated document stored per candidate email. Offer letters and
/// completion certificates share this shape, in separate tables.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LetterRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department_name: String,
    pub tenure_months: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing)]
    pub pdf: Vec<u8>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DownloadQuery {
    pub email: String,
}
