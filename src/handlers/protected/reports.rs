use axum::{extract::Query, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::report_service::CategoryTotal;
use crate::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct CategoryTotalsQuery {
    /// Accepted for wire compatibility, but only the caller's own id is
    /// allowed. The old behavior let any caller read any user's totals.
    pub user_id: Option<i32>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// GET /reports/category-totals
pub async fn category_totals(
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CategoryTotalsQuery>,
) -> Result<Json<Vec<CategoryTotal>>, ApiError> {
    if let Some(requested) = query.user_id {
        if requested != auth_user.user_id {
            tracing::warn!(
                caller = auth_user.user_id,
                requested,
                "rejected cross-user report request"
            );
            return Err(ApiError::forbidden(
                "reports are limited to the authenticated user",
            ));
        }
    }

    let service = ReportService::new().await?;
    let totals = service
        .category_totals(auth_user.user_id, query.start, query.end)
        .await?;

    Ok(Json(totals))
}
