//! bcrypt implementation of [`PasswordHasher`]

use crate::contract::SeedError;
use crate::domain::PasswordHasher;
use async_trait::async_trait;

/// Hashes on the blocking pool; bcrypt is deliberately slow
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, SeedError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| SeedError::PasswordHash(e.to_string()))?
            .map_err(|e| SeedError::PasswordHash(e.to_string()))
    }
}
