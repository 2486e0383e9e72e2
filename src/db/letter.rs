//! Persistence for generated offer letters and completion certificates.
//!
//! Both document kinds share one row shape keyed by candidate email; the PDF
//! buffer is stored alongside the candidate fields it was generated from.

use chrono::NaiveDate;
use uuid::Uuid;

use super::AppState;
use crate::letter::models::LetterRecord;

const LETTER_COLUMNS: &str = "id, name, email, department_name, tenure_months, start_date, \
     end_date, pdf, created_at, updated_at";

/// The two letter tables. Using one enum keeps the queries in a single place
/// since the row shape is identical.
#[derive(Debug, Clone, Copy)]
pub enum LetterTable {
    OfferLetters,
    CompletionCertificates,
}

impl LetterTable {
    fn name(self) -> &'static str {
        match self {
            LetterTable::OfferLetters => "offer_letters",
            LetterTable::CompletionCertificates => "completion_certificates",
        }
    }
}

impl AppState {
    pub async fn get_letter_by_email(
        &self,
        table: LetterTable,
        email: &str,
    ) -> Result<Option<LetterRecord>, sqlx::Error> {
        sqlx::query_as::<_, LetterRecord>(&format!(
            "SELECT {LETTER_COLUMNS} FROM {} WHERE email = $1",
            table.name()
        ))
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_letter(
        &self,
        table: LetterTable,
        name: &str,
        email: &str,
        department_name: &str,
        tenure_months: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pdf: &[u8],
    ) -> Result<LetterRecord, sqlx::Error> {
        sqlx::query_as::<_, LetterRecord>(&format!(
            r#"
            INSERT INTO {}
                (id, name, email, department_name, tenure_months, start_date, end_date, pdf)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LETTER_COLUMNS}
            "#,
            table.name()
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email.to_lowercase())
        .bind(department_name.to_lowercase())
        .bind(tenure_months)
        .bind(start_date)
        .bind(end_date)
        .bind(pdf)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_letter_pdf(
        &self,
        table: LetterTable,
        email: &str,
        pdf: &[u8],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(&format!(
            "UPDATE {} SET pdf = $2, updated_at = NOW() WHERE email = $1",
            table.name()
        ))
        .bind(email.to_lowercase())
        .bind(pdf)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
