use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub user_id: i32,
    pub category_id: i32,
}

/// Expense joined with its category name, the shape returned by the
/// list endpoint. Field order matches the wire format.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExpenseWithCategory {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub category_id: i32,
    pub category_name: String,
    pub date: NaiveDate,
    pub user_id: i32,
}
