use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Category;
use crate::services::is_unique_violation;

#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),

    #[error("Category already exists: {0}")]
    AlreadyExists(String),
}

/// Categories are append-only: there is no update or delete.
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub async fn new() -> Result<Self, CategoryError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// All categories, name ascending
    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Insert a new category. Names are unique, case-sensitive exact match.
    pub async fn create(&self, name: &str) -> Result<Category, CategoryError> {
        let existing: Option<(i32,)> = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(CategoryError::AlreadyExists(name.to_string()));
        }

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CategoryError::AlreadyExists(name.to_string())
            } else {
                CategoryError::Database(e)
            }
        })?;

        Ok(category)
    }
}
