//! Infrastructure - SeaORM storage and bcrypt hashing

pub mod password;
pub mod storage;

pub use password::BcryptPasswordHasher;
