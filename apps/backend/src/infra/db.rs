use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const POSTGRES_CONNECT_ATTEMPTS: u32 = 5;
const POSTGRES_RETRY_INTERVAL: Duration = Duration::from_millis(500);

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    match kind {
        // Every in-memory connection is its own database
        DbKind::SqliteMemory => {
            options.max_connections(1).min_connections(1);
        }
        DbKind::Postgres => {
            options
                .max_connections(10)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }
    options
}

/// Retry a connection attempt with a fixed interval; returns the last error
/// once attempts are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(value);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, error = %e, "connection_retry=failed");
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Connect to the selected database. Does not run migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let options = connect_options(kind, db_url(kind)?);

    let attempts = match kind {
        DbKind::Postgres => POSTGRES_CONNECT_ATTEMPTS,
        DbKind::SqliteMemory => 1,
    };

    retry_connection(
        || {
            let options = options.clone();
            async move { Database::connect(options).await.map_err(AppError::from) }
        },
        attempts,
        POSTGRES_RETRY_INTERVAL,
    )
    .await
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(db = ?kind, "database ready");
    Ok(conn)
}
