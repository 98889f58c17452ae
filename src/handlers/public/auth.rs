use axum::{http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;
use crate::handlers::require_field;
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/register
pub async fn register(
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let username = require_field(req.username.as_deref(), "username")?;
    let password = require_field(req.password.as_deref(), "password")?;

    let service = UserService::new().await?;
    let user = service
        .register(username, password, req.email.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": user.id, "username": user.username })),
    ))
}

/// POST /auth/login
///
/// Missing fields fall through to the same 401 as a wrong password;
/// the response never says which part of the credentials was bad.
pub async fn login(Json(req): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let username = req.username.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    let service = UserService::new().await?;
    let user = service.authenticate(username, password).await?;

    let claims = Claims::new(user.id, user.username);
    let token = auth::generate_jwt(&claims, &config::config().security.jwt_secret)
        .map_err(ApiError::internal)?;

    Ok(Json(json!({ "access_token": token })))
}
