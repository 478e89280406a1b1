use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod api;
mod config;
mod database;
mod error;
mod handlers;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, STUDENT_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton and logs the
    // placeholder warning when DATABASE_URL is missing)
    let config = crate::config::config();
    tracing::info!("Starting Student API in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Student API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Student CRUD
        .merge(student_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn student_routes() -> Router {
    use handlers::students;

    // The collection path is registered with and without the trailing slash;
    // axum routes them separately.
    Router::new()
        .route("/students", get(students::list).post(students::create))
        .route("/students/", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get)
                .put(students::update)
                .delete(students::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Student API",
        "version": version,
        "description": "CRUD REST API for student records (Axum + SQLx + PostgreSQL)",
        "endpoints": {
            "home": "/",
            "health": "/health",
            "students": "/students[/:id]",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
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
