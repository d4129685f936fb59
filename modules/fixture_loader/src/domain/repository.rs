//! Repository traits for data access
//!
//! These traits define the writes the loader needs from the datastore.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{NewProfile, NewReview, NewUser, Profile, Review, User};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the user unless one with the same email exists.
    ///
    /// An existing row is returned unchanged.
    async fn upsert_by_email(&self, user: &NewUser) -> Result<User>;
}

/// Repository for profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create the profile unless its owning user already has one.
    ///
    /// An existing row is returned unchanged.
    async fn upsert_by_user_id(&self, profile: &NewProfile) -> Result<Profile>;
}

/// Repository for reviews
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Always inserts a new row
    async fn create(&self, review: &NewReview) -> Result<Review>;
}
