//! Configuration for the fixture loader
//!
//! Layered with figment: built-in defaults, then an optional YAML/JSON file,
//! then `FIXTURE_LOADER_*` environment variables (`__` separates nesting,
//! e.g. `FIXTURE_LOADER_DATABASE__URL`).

use crate::contract::SeedError;
use figment::providers::{Env, Format, Json, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "FIXTURE_LOADER_";

/// Fixture loader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Datastore connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Path of the JSON document holding `defaultAccounts`, `defaultProfiles`, `defaultReviews`
    #[serde(default = "default_fixtures_path")]
    pub fixtures_path: PathBuf,

    /// Password shared by every seeded account
    #[serde(default)]
    pub password: PasswordConfig,

    /// Apply schema migrations before seeding
    #[serde(default)]
    pub migrate: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SeaORM connection URL (sqlite:// or postgres://)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound of the connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Log every SQL statement
    #[serde(default)]
    pub sqlx_logging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordConfig {
    #[serde(default = "default_plaintext")]
    pub plaintext: String,

    /// bcrypt cost factor
    #[serde(default = "default_cost")]
    pub cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            fixtures_path: default_fixtures_path(),
            password: PasswordConfig::default(),
            migrate: false,
            log_level: default_log_level(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            sqlx_logging: false,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            plaintext: default_plaintext(),
            cost: default_cost(),
        }
    }
}

impl Config {
    /// Base figment: defaults, then `file` when given, then environment.
    ///
    /// A file with a `.json` extension is read as JSON, anything else as YAML.
    /// figment treats a missing file as empty; callers that require the file
    /// must check for it first.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = file {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            figment = if is_json {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Yaml::file(path))
            };
        }

        // FIXTURE_LOADER_CONFIG names the file itself and is read by the CLI
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    /// Extract the configuration from the layered sources.
    pub fn load(file: Option<&Path>) -> Result<Self, SeedError> {
        Ok(Self::figment(file).extract()?)
    }
}

fn default_fixtures_path() -> PathBuf {
    PathBuf::from("config/settings.development.json")
}

fn default_database_url() -> String {
    "sqlite://fixtures.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_plaintext() -> String {
    "changeme".to_string()
}

fn default_cost() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}
