use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write was rejected by a uniqueness or not-null constraint.
    /// The session has already been rolled back when this surfaces.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Classify a sqlx error, pulling out constraint breaches so callers can
    /// report them as client errors instead of generic failures.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                // 23505 unique_violation, 23502 not_null_violation
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unique constraint");
                    return DatabaseError::IntegrityViolation(format!(
                        "duplicate value violates {}",
                        constraint
                    ));
                }
                Some("23502") => {
                    return DatabaseError::IntegrityViolation(
                        "null value violates not-null constraint".to_string(),
                    );
                }
                _ => {}
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Shared connection pool for the students database, created once on first use.
pub struct DatabaseManager;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

impl DatabaseManager {
    /// Get the shared pool, connecting lazily on first call. A missing or bad
    /// DATABASE_URL therefore fails the first request, not process startup.
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let pool = POOL
            .get_or_try_init(|| async {
                let cfg = config::config();
                let pool = PgPoolOptions::new()
                    .max_connections(cfg.database.max_connections)
                    .acquire_timeout(std::time::Duration::from_secs(
                        cfg.database.connection_timeout,
                    ))
                    .connect(&cfg.database.url)
                    .await?;
                info!("Created database pool");
                Ok::<_, sqlx::Error>(pool)
            })
            .await?;
        Ok(pool.clone())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}
