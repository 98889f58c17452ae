pub mod category_service;
pub mod expense_service;
pub mod report_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use report_service::ReportService;
pub use user_service::UserService;

/// Postgres unique_violation, raced past an existence pre-check
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
