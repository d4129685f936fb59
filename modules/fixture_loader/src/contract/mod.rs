//! Contract layer - models shared between the loader and its repositories
//!
//! Transport-agnostic: the storage layer maps its entities into these types.

pub mod error;
pub mod model;

pub use error::SeedError;
pub use model::{
    Experience, NewProfile, NewReview, NewUser, Profile, Review, Role, SeedOutcome, User,
};
