//! Common test utilities: fixture builders and in-memory repositories

#![allow(dead_code)]

use async_trait::async_trait;
use fixture_loader::contract::*;
use fixture_loader::domain::{PasswordHasher, ProfileRepository, ReviewRepository, UserRepository};
use fixture_loader::fixtures::{AccountSeed, FixtureSet, ProfileSeed, ReviewGroup, ReviewSeed};
use fixture_loader::FixtureLoader;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ===== Fixture builders =====

pub fn account(email: &str, role: Option<&str>) -> AccountSeed {
    AccountSeed {
        email: email.to_string(),
        role: role.map(str::to_string),
    }
}

pub fn profile_seed(username: &str, user_email: &str) -> ProfileSeed {
    ProfileSeed {
        username: username.to_string(),
        user_email: user_email.to_string(),
        first_name: "First".to_string(),
        last_name: "Last".to_string(),
        image: Some(format!("/images/{username}.png")),
        rating: 4.5,
        musical_goals: vec!["Start a band".to_string()],
        musical_tastes: vec!["Jazz".to_string(), "Blues".to_string()],
        instruments: vec!["Guitar".to_string()],
        experience: Experience::Intermediate,
        description: Some("Plays on weekends".to_string()),
    }
}

pub fn review_seed(user_id: i32, rating: i32, comment: &str) -> ReviewSeed {
    ReviewSeed {
        user_id,
        rating,
        comment: comment.to_string(),
        created_at: None,
    }
}

pub fn review_group(profile_id: i32, reviews: Vec<ReviewSeed>) -> ReviewGroup {
    ReviewGroup {
        profile_id,
        reviews,
    }
}

/// Two accounts, one profile for the first, one review of it by the second.
///
/// Ids are assigned sequentially from 1 by the mocks and by a fresh schema,
/// so a@x.com is user 1, b@x.com is user 2 and a's profile is profile 1.
pub fn basic_fixtures() -> FixtureSet {
    FixtureSet {
        default_accounts: vec![account("a@x.com", Some("USER")), account("b@x.com", Some("ADMIN"))],
        default_profiles: vec![profile_seed("alice", "a@x.com")],
        default_reviews: vec![review_group(1, vec![review_seed(2, 5, "great")])],
    }
}

// ===== Mock repositories =====

#[derive(Clone, Default)]
pub struct MockUserRepo {
    rows: Arc<RwLock<Vec<User>>>,
    latency: Arc<HashMap<String, Duration>>,
    fail_on: Option<String>,
}

impl MockUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the write for these emails
    pub fn with_latency(mut self, latency: HashMap<String, Duration>) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    /// Fail the write for this email
    pub fn failing_on(mut self, email: &str) -> Self {
        self.fail_on = Some(email.to_string());
        self
    }

    pub fn rows(&self) -> Vec<User> {
        self.rows.read().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn upsert_by_email(&self, user: &NewUser) -> anyhow::Result<User> {
        if let Some(delay) = self.latency.get(&user.email) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_on.as_deref() == Some(user.email.as_str()) {
            anyhow::bail!("connection reset while writing {}", user.email);
        }

        let mut rows = self.rows.write();
        if let Some(existing) = rows.iter().find(|u| u.email == user.email) {
            return Ok(existing.clone());
        }
        let created = User {
            id: rows.len() as i32 + 1,
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role,
        };
        rows.push(created.clone());
        Ok(created)
    }
}

#[derive(Clone, Default)]
pub struct MockProfileRepo {
    rows: Arc<RwLock<Vec<Profile>>>,
    fail: bool,
}

impl MockProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<Profile> {
        self.rows.read().clone()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepo {
    async fn upsert_by_user_id(&self, profile: &NewProfile) -> anyhow::Result<Profile> {
        if self.fail {
            anyhow::bail!("profiles table is read-only");
        }

        let mut rows = self.rows.write();
        if let Some(existing) = rows.iter().find(|p| p.user_id == profile.user_id) {
            return Ok(existing.clone());
        }
        let created = Profile {
            id: rows.len() as i32 + 1,
            user_id: profile.user_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            image: profile.image.clone(),
            rating: profile.rating,
            musical_goals: profile.musical_goals.clone(),
            musical_tastes: profile.musical_tastes.clone(),
            instruments: profile.instruments.clone(),
            experience: profile.experience,
            description: profile.description.clone(),
        };
        rows.push(created.clone());
        Ok(created)
    }
}

/// Timestamp the mock uses when a review has no `createdAt`
pub fn store_default_timestamp() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

#[derive(Clone, Default)]
pub struct MockReviewRepo {
    rows: Arc<RwLock<Vec<Review>>>,
    fail: bool,
}

impl MockReviewRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<Review> {
        self.rows.read().clone()
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepo {
    async fn create(&self, review: &NewReview) -> anyhow::Result<Review> {
        if self.fail {
            anyhow::bail!("foreign key violation on reviews.profile_id");
        }

        let mut rows = self.rows.write();
        let created = Review {
            id: rows.len() as i32 + 1,
            rating: review.rating,
            comment: review.comment.clone(),
            profile_id: review.profile_id,
            user_id: review.user_id,
            created_at: review.created_at.unwrap_or_else(store_default_timestamp),
        };
        rows.push(created.clone());
        Ok(created)
    }
}

/// Produces a distinct hash per call so repeated hashing is observable
#[derive(Default)]
pub struct CountingHasher {
    calls: AtomicUsize,
}

impl CountingHasher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, SeedError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("hashed:{plaintext}:{call}"))
    }
}

/// Loader over mock repositories, with handles to inspect them
pub struct TestHarness {
    pub users: MockUserRepo,
    pub profiles: MockProfileRepo,
    pub reviews: MockReviewRepo,
    pub hasher: Arc<CountingHasher>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_repos(MockUserRepo::new(), MockProfileRepo::new())
    }

    pub fn with_repos(users: MockUserRepo, profiles: MockProfileRepo) -> Self {
        Self {
            users,
            profiles,
            reviews: MockReviewRepo::new(),
            hasher: Arc::new(CountingHasher::default()),
        }
    }

    pub fn loader(&self) -> FixtureLoader {
        FixtureLoader::new(
            Arc::new(self.users.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.reviews.clone()),
            self.hasher.clone(),
            "changeme",
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
