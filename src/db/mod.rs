pub mod queries;

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{Answer, Question};
pub use queries::users::User;

use sqlx::Error;

/// Builds the process-wide pool. Connections are opened on first use, so an unreachable
/// store only fails the requests that touch it.
pub fn establish_connection(url: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options))
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Startup preparation: migrations, then the default category seed.
/// Failures are logged and the process keeps going.
pub async fn prepare_store(pool: &SqlitePool) {
    tracing::info!("Running db migrations...");
    if let Err(e) = run_migrations(pool).await {
        tracing::error!(error = %e, "Migrations failed, store requests will fail until it is reachable");
        return;
    }
    match queries::categories::seed_if_empty(pool, &queries::categories::STARTUP_DEFAULTS).await
    {
        Ok(0) => tracing::debug!("Categories already present, skipping seed"),
        Ok(count) => tracing::info!(count, "Seeded default categories"),
        Err(e) => tracing::error!(error = %e, "Failed to seed default categories"),
    }
}
