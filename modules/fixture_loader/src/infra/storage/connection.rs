//! Datastore connection lifecycle

use super::migrations::Migrator;
use crate::config::DatabaseConfig;
use crate::contract::SeedError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Open a connection pool from configuration.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, SeedError> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(options).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "Connected to datastore"
    );
    Ok(db)
}

/// Apply pending schema migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), SeedError> {
    Migrator::up(db, None).await?;
    tracing::info!("Fixture loader migrations completed");
    Ok(())
}
