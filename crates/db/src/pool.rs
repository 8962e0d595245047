//! Direct Postgres access for deployments that bypass the REST API.
//!
//! Only [`PgGateway`](crate::PgGateway) and the `migrate` command open a
//! pool; the default REST gateway never touches this module.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Pool shared by every request when the Postgres gateway is selected.
pub type DbPool = PgPool;

/// Open a pool on the allotment database behind `database_url`, holding at
/// most `max_connections` connections.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!(max_connections, "Connecting to allotment database");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create the seven allotment tables from `migrations/` at the workspace
/// root. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Applying allotment schema migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
