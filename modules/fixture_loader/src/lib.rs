//! Fixture Loader
//!
//! Seeds a relational datastore with baseline accounts, profiles and reviews
//! read from a static fixture document. Users and profiles are written with
//! insert-or-no-op upserts on their natural keys; reviews are always created.

// Public exports
pub mod contract;
pub use contract::{
    Experience, NewProfile, NewReview, NewUser, Profile, Review, Role, SeedError, SeedOutcome,
    User,
};

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod fixtures;
pub mod infra;

pub use config::Config;
pub use domain::FixtureLoader;
pub use fixtures::FixtureSet;
