//! Contract models for the fixture loader
//!
//! These models are what the repositories hand back to the loader once a row
//! exists in the datastore. NO serde derives on the persisted models - the
//! fixture document has its own serde types in `crate::fixtures`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Normalize a role string from the fixture document.
    ///
    /// Only the exact string `ADMIN` grants the admin role; anything else,
    /// including a missing role, falls back to `USER`.
    pub fn from_seed(raw: Option<&str>) -> Self {
        match raw {
            Some("ADMIN") => Self::Admin,
            _ => Self::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse the stored representation back into the enum.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Musical experience level of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "BEGINNER",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
            Self::Expert => "EXPERT",
        }
    }

    /// Parse the stored representation back into the enum.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "BEGINNER" => Some(Self::Beginner),
            "INTERMEDIATE" => Some(Self::Intermediate),
            "ADVANCED" => Some(Self::Advanced),
            "EXPERT" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Persisted rows =====

/// A user account as stored in the datastore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Generated identifier
    pub id: i32,
    /// Unique natural key
    pub email: String,
    /// Password hash (never the plaintext)
    pub password: String,
    pub role: Role,
}

/// A musician profile, one-to-one with a [`User`]
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Generated identifier
    pub id: i32,
    /// Owning user (unique)
    pub user_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub rating: f64,
    pub musical_goals: Vec<String>,
    pub musical_tastes: Vec<String>,
    pub instruments: Vec<String>,
    pub experience: Experience,
    pub description: Option<String>,
}

/// A review left by a user on a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Generated identifier
    pub id: i32,
    pub rating: i32,
    pub comment: String,
    /// Reviewed profile
    pub profile_id: i32,
    /// Reviewer
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

// ===== Write payloads =====

/// Payload used to create a user when no row with the email exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Payload used to create a profile when the owning user has none yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub user_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub rating: f64,
    pub musical_goals: Vec<String>,
    pub musical_tastes: Vec<String>,
    pub instruments: Vec<String>,
    pub experience: Experience,
    pub description: Option<String>,
}

/// Payload for a new review row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub rating: i32,
    pub comment: String,
    pub profile_id: i32,
    pub user_id: i32,
    /// `None` leaves the timestamp to the datastore default
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything a single run produced
#[derive(Debug, Clone, Default)]
pub struct SeedOutcome {
    /// Users in fixture order
    pub users: Vec<User>,
    /// One slot per profile fixture; `None` where the owning account was missing
    pub profiles: Vec<Option<Profile>>,
    /// Reviews created by this run
    pub reviews: Vec<Review>,
}

impl SeedOutcome {
    pub fn valid_profile_count(&self) -> usize {
        self.profiles.iter().flatten().count()
    }

    pub fn skipped_profile_count(&self) -> usize {
        self.profiles.len() - self.valid_profile_count()
    }
}
