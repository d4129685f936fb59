//! Wiring and lifecycle for a single seeding run

use crate::config::Config;
use crate::contract::{SeedError, SeedOutcome};
use crate::domain::FixtureLoader;
use crate::fixtures::FixtureSet;
use crate::infra::storage::{
    self, SeaOrmProfileRepository, SeaOrmReviewRepository, SeaOrmUserRepository,
};
use crate::infra::BcryptPasswordHasher;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Build a loader over an open connection.
pub fn build_loader(db: Arc<DatabaseConnection>, config: &Config) -> FixtureLoader {
    let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let profile_repo = Arc::new(SeaOrmProfileRepository::new(db.clone()));
    let review_repo = Arc::new(SeaOrmReviewRepository::new(db));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.password.cost));

    FixtureLoader::new(
        user_repo,
        profile_repo,
        review_repo,
        hasher,
        config.password.plaintext.clone(),
    )
}

/// Seed an already connected datastore, migrating first when configured.
pub async fn seed(
    db: Arc<DatabaseConnection>,
    config: &Config,
    fixtures: &FixtureSet,
) -> Result<SeedOutcome, SeedError> {
    if config.migrate {
        storage::migrate(&db).await?;
    }

    build_loader(db, config).run(fixtures).await
}

/// Load fixtures, connect, seed, and release the connection.
///
/// The connection is closed whether or not seeding succeeded; a seeding
/// error takes precedence over a close error.
pub async fn run(config: &Config) -> Result<SeedOutcome, SeedError> {
    let fixtures = FixtureSet::load(&config.fixtures_path).await?;
    let db = Arc::new(storage::connect(&config.database).await?);

    let outcome = seed(db.clone(), config, &fixtures).await;

    let closed = match Arc::try_unwrap(db) {
        Ok(db) => db.close().await.map_err(SeedError::from),
        Err(_) => {
            tracing::warn!("Datastore handle still shared at shutdown; pool dropped instead of closed");
            Ok(())
        }
    };

    let outcome = outcome?;
    closed?;
    tracing::info!("Disconnected from datastore");
    Ok(outcome)
}
