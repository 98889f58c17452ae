use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;

/// Categories inserted on first boot so a fresh database is usable
/// without any manual setup.
const DEFAULT_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Health & Fitness",
    "Bills & Utilities",
    "Other",
];

/// Idempotent schema bootstrap, run once at startup.
///
/// Deleting a user cascades to their expenses. Categories carry no
/// cascade rule: they are append-only and nothing deletes them.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(80) NOT NULL UNIQUE,
            email VARCHAR(120) UNIQUE,
            password_hash VARCHAR(256) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS expenses (
            id SERIAL PRIMARY KEY,
            amount NUMERIC(10,2) NOT NULL,
            description TEXT,
            date DATE NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed the default categories when the table is empty
pub async fn seed_default_categories(pool: &PgPool) -> Result<(), DatabaseError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if count.0 > 0 {
        return Ok(());
    }

    for name in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    info!("seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(())
}
