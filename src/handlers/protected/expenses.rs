use axum::{extract::Path, http::StatusCode, Extension, Json};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::database::models::ExpenseWithCategory;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::expense_service::ExpenseChanges;
use crate::services::ExpenseService;

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub category_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub category_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// POST /expenses
pub async fn create_expense(
    Extension(auth_user): Extension<AuthUser>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::bad_request("missing amount"))?;
    let category_id = req
        .category_id
        .ok_or_else(|| ApiError::bad_request("missing category_id"))?;

    let service = ExpenseService::new().await?;
    let expense = service
        .create(
            auth_user.user_id,
            amount,
            category_id,
            req.date,
            req.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": expense.id }))))
}

/// GET /expenses
pub async fn list_expenses(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Vec<ExpenseWithCategory>>, ApiError> {
    let service = ExpenseService::new().await?;
    let expenses = service.list_for_user(auth_user.user_id).await?;

    Ok(Json(expenses))
}

/// PUT /expenses/:id
pub async fn update_expense(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateExpenseRequest>,
) -> Result<Json<Value>, ApiError> {
    let changes = ExpenseChanges {
        amount: req.amount,
        description: req.description,
        category_id: req.category_id,
        date: req.date,
    };

    let service = ExpenseService::new().await?;
    service.update(id, auth_user.user_id, changes).await?;

    Ok(Json(json!({ "msg": "ok" })))
}

/// DELETE /expenses/:id
pub async fn delete_expense(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let service = ExpenseService::new().await?;
    service.delete(id, auth_user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /expenses/totals
///
/// Object keyed by category name; only categories the caller has spent
/// against appear.
pub async fn expense_totals(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let service = ExpenseService::new().await?;
    let totals = service.totals(auth_user.user_id).await?;

    let mut body = Map::new();
    for (name, total) in totals {
        body.insert(name, json!(total.to_f64().unwrap_or(0.0)));
    }

    Ok(Json(Value::Object(body)))
}
