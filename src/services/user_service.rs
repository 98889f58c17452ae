use sqlx::PgPool;

use crate::auth;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::User;
use crate::services::is_unique_violation;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),

    #[error("Username already taken: {0}")]
    AlreadyExists(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, UserError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Create a new user with a hashed password.
    ///
    /// The unique-violation mapping covers the race where two requests
    /// register the same username between pre-check and insert.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User, UserError> {
        if self.find_by_username(username).await?.is_some() {
            return Err(UserError::AlreadyExists(username.to_string()));
        }

        let password_hash =
            auth::hash_password(password).map_err(|e| UserError::Hashing(e.to_string()))?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                UserError::AlreadyExists(username.to_string())
            } else {
                UserError::Database(e)
            }
        })?;

        Ok(user)
    }

    /// Check a username/password pair.
    /// Unknown username and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        match auth::verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(UserError::InvalidCredentials),
            Err(e) => Err(UserError::Hashing(e.to_string())),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
