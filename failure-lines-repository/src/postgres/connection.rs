// PostgreSQL connection setup
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::RecordSourceError;

/// Connect to PostgreSQL and return a connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, RecordSourceError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
