//! Storage layer - database entities and repositories

pub mod connection;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, migrate};
pub use repositories::{SeaOrmProfileRepository, SeaOrmReviewRepository, SeaOrmUserRepository};
