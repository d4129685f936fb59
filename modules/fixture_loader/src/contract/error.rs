//! Contract error types for the fixture loader
//!
//! Unresolved foreign references are not errors: they are logged and the
//! record is skipped. Everything here aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Fixture loader errors
#[derive(Debug, Error)]
pub enum SeedError {
    /// Configuration could not be assembled from defaults, file and environment
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Fixture document could not be read
    #[error("failed to read fixtures from {}", path.display())]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture document is not valid JSON for the expected shape
    #[error("failed to parse fixtures from {}", path.display())]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A review `createdAt` value is not a recognizable date
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Password hashing failed
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// A repository write failed
    #[error("failed to write {entity}")]
    Storage {
        /// Entity being written (user, profile, review)
        entity: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Connecting, migrating or closing the datastore failed
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl SeedError {
    pub fn storage(entity: &'static str, source: anyhow::Error) -> Self {
        Self::Storage { entity, source }
    }
}

impl From<figment::Error> for SeedError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
