use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Schema applied by `DatabaseManager::migrate`
const SCHEMA_SQL: &str = include_str!("../../migrations/0001_documents.sql");

/// Errors from the document store and pool management
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds and prepares the PostgreSQL pool backing the document store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using the configured URL and limits
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let target = Self::redacted_target(connection_string)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(connection_string)
            .await?;

        info!("Created database pool for: {}", target);
        Ok(pool)
    }

    /// Create the documents and extracted_data tables if they are missing
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        // Plain &str runs as a simple query, so the multi-statement file is accepted
        pool.execute(SCHEMA_SQL)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        info!("Document schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Host and database name of a connection string, without credentials
    fn redacted_target(connection_string: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(connection_string).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        let host = url.host_str().ok_or(DatabaseError::InvalidDatabaseUrl)?;
        let database = url.path().trim_start_matches('/');

        Ok(match url.port() {
            Some(port) => format!("{}:{}/{}", host, port, database),
            None => format!("{}/{}", host, database),
        })
    }
}
