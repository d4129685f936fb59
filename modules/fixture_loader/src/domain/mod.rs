//! Domain layer - seeding logic and the seams it writes through

pub mod password;
pub mod repository;
pub mod service;

pub use password::PasswordHasher;
pub use repository::{ProfileRepository, ReviewRepository, UserRepository};
pub use service::FixtureLoader;
