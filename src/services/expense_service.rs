use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Expense, ExpenseWithCategory};

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),

    #[error("Expense not found: {0}")]
    NotFound(i32),

    #[error("caller does not own this expense")]
    NotOwner,

    #[error("category does not exist: {0}")]
    UnknownCategory(i32),
}

/// Partial-field edit. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ExpenseChanges {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

pub struct ExpenseService {
    pool: PgPool,
}

impl ExpenseService {
    pub async fn new() -> Result<Self, ExpenseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Insert an expense for the given owner.
    ///
    /// The category must exist; a dangling category id is rejected here
    /// instead of leaking out as a raw foreign-key violation. Date
    /// defaults to the current UTC date.
    pub async fn create(
        &self,
        user_id: i32,
        amount: Decimal,
        category_id: i32,
        date: Option<NaiveDate>,
        description: Option<&str>,
    ) -> Result<Expense, ExpenseError> {
        self.require_category(category_id).await?;

        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        let expense = sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (amount, description, date, user_id, category_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, amount, description, date, user_id, category_id",
        )
        .bind(amount)
        .bind(description)
        .bind(date)
        .bind(user_id)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    /// The owner's expenses, newest date first, with resolved category names
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<ExpenseWithCategory>, ExpenseError> {
        let expenses = sqlx::query_as::<_, ExpenseWithCategory>(
            "SELECT e.id, e.amount, e.description, e.category_id, c.name AS category_name,
                    e.date, e.user_id
             FROM expenses e
             JOIN categories c ON c.id = e.category_id
             WHERE e.user_id = $1
             ORDER BY e.date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Merge the provided fields into the stored row.
    /// Only the owning user may update; anyone else gets NotOwner.
    pub async fn update(
        &self,
        expense_id: i32,
        caller_id: i32,
        changes: ExpenseChanges,
    ) -> Result<Expense, ExpenseError> {
        let existing = self.get_owned(expense_id, caller_id).await?;

        if let Some(category_id) = changes.category_id {
            self.require_category(category_id).await?;
        }

        let amount = changes.amount.unwrap_or(existing.amount);
        let description = changes.description.or(existing.description);
        let category_id = changes.category_id.unwrap_or(existing.category_id);
        let date = changes.date.unwrap_or(existing.date);

        let expense = sqlx::query_as::<_, Expense>(
            "UPDATE expenses
             SET amount = $1, description = $2, category_id = $3, date = $4
             WHERE id = $5
             RETURNING id, amount, description, date, user_id, category_id",
        )
        .bind(amount)
        .bind(description)
        .bind(category_id)
        .bind(date)
        .bind(expense_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Permanently remove the row. Same ownership check as update.
    pub async fn delete(&self, expense_id: i32, caller_id: i32) -> Result<(), ExpenseError> {
        self.get_owned(expense_id, caller_id).await?;

        sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Sum of the owner's expenses per category name.
    /// Categories without any expense are absent from the result.
    pub async fn totals(&self, user_id: i32) -> Result<Vec<(String, Decimal)>, ExpenseError> {
        let totals = sqlx::query_as::<_, (String, Decimal)>(
            "SELECT c.name, SUM(e.amount) AS total
             FROM expenses e
             JOIN categories c ON c.id = e.category_id
             WHERE e.user_id = $1
             GROUP BY c.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }

    async fn get_owned(&self, expense_id: i32, caller_id: i32) -> Result<Expense, ExpenseError> {
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT id, amount, description, date, user_id, category_id
             FROM expenses
             WHERE id = $1",
        )
        .bind(expense_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ExpenseError::NotFound(expense_id))?;

        if expense.user_id != caller_id {
            return Err(ExpenseError::NotOwner);
        }

        Ok(expense)
    }

    async fn require_category(&self, category_id: i32) -> Result<(), ExpenseError> {
        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        if exists.is_none() {
            return Err(ExpenseError::UnknownCategory(category_id));
        }

        Ok(())
    }
}
