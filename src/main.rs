use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use expense_tracker_rust::database::manager::DatabaseManager;
use expense_tracker_rust::database::schema;
use expense_tracker_rust::{config, middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting expense-tracker API in {:?} mode", config.environment);

    // Bootstrap schema and seed categories before accepting traffic
    let pool = DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect database: {}", e));
    schema::ensure_schema(&pool)
        .await
        .expect("schema bootstrap failed");
    schema::seed_default_categories(&pool)
        .await
        .expect("category seed failed");

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("EXPENSE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("expense-tracker API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(category_routes())
        // Protected API (JWT bearer)
        .merge(expense_routes())
        .merge(report_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use axum::routing::post;
    use expense_tracker_rust::handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn category_routes() -> Router {
    use expense_tracker_rust::handlers::public::categories;

    Router::new().route(
        "/categories",
        get(categories::list_categories).post(categories::create_category),
    )
}

fn expense_routes() -> Router {
    use axum::routing::put;
    use expense_tracker_rust::handlers::protected::expenses;

    Router::new()
        .route(
            "/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/expenses/totals", get(expenses::expense_totals))
        .route(
            "/expenses/:id",
            put(expenses::update_expense).delete(expenses::delete_expense),
        )
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn report_routes() -> Router {
    use expense_tracker_rust::handlers::protected::reports;

    Router::new()
        .route("/reports/category-totals", get(reports::category_totals))
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Expense Tracker API (Rust)",
        "version": version,
        "endpoints": {
            "auth": "/auth/register, /auth/login (public)",
            "categories": "/categories (public)",
            "expenses": "/expenses, /expenses/:id, /expenses/totals (bearer token)",
            "reports": "/reports/category-totals (bearer token)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
