//! Password hashing seam
//!
//! The loader hashes one constant plaintext per run and shares the result
//! across every seeded account.

use crate::contract::SeedError;
use async_trait::async_trait;

/// One-way password hash
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, SeedError>;
}
