use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::database::manager::{DatabaseError, DatabaseManager};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub async fn new() -> Result<Self, ReportError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Per-category expense totals for one user, optionally bounded by an
    /// inclusive date range. The inner join drops categories without a
    /// matching expense instead of zero-reporting them.
    pub async fn category_totals(
        &self,
        user_id: i32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<CategoryTotal>, ReportError> {
        let totals = sqlx::query_as::<_, CategoryTotal>(
            "SELECT c.name AS category, SUM(e.amount) AS total
             FROM expenses e
             JOIN categories c ON c.id = e.category_id
             WHERE e.user_id = $1
               AND ($2::date IS NULL OR e.date >= $2)
               AND ($3::date IS NULL OR e.date <= $3)
             GROUP BY c.name",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }
}
