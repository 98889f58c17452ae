use axum::{http::StatusCode, Json};
use serde::Deserialize;

use crate::database::models::Category;
use crate::error::ApiError;
use crate::handlers::require_field;
use crate::services::CategoryService;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

/// GET /categories
pub async fn list_categories() -> Result<Json<Vec<Category>>, ApiError> {
    let service = CategoryService::new().await?;
    let categories = service.list().await?;

    Ok(Json(categories))
}

/// POST /categories
pub async fn create_category(
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let name = require_field(req.name.as_deref(), "name")?;

    let service = CategoryService::new().await?;
    let category = service.create(name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}
