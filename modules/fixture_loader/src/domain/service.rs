//! Domain service - the three seeding phases
//!
//! Users, then profiles, then reviews. Each phase fans out one write per
//! fixture and waits for the whole batch; results keep fixture order and the
//! first failed write fails the batch. Unresolved references (a profile whose
//! account is missing, a review group whose profile is missing, a review whose
//! reviewer is missing) are logged and skipped.

use super::password::PasswordHasher;
use super::repository::{ProfileRepository, ReviewRepository, UserRepository};
use crate::contract::{
    NewProfile, NewReview, NewUser, Profile, Review, Role, SeedError, SeedOutcome, User,
};
use crate::fixtures::{AccountSeed, FixtureSet, ProfileSeed, ReviewGroup, ReviewSeed};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Seeds fixture data through the injected repositories
pub struct FixtureLoader {
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    hasher: Arc<dyn PasswordHasher>,
    /// Plaintext shared by every seeded account
    password: String,
}

impl FixtureLoader {
    /// Create a new loader instance
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        profile_repo: Arc<dyn ProfileRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        hasher: Arc<dyn PasswordHasher>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            review_repo,
            hasher,
            password: password.into(),
        }
    }

    /// Run all three phases in order.
    ///
    /// Re-running is safe for users and profiles. Reviews are plain inserts,
    /// so a second run duplicates every review it can resolve.
    pub async fn run(&self, fixtures: &FixtureSet) -> Result<SeedOutcome, SeedError> {
        info!("Seeding the database");

        let users = self.seed_users(&fixtures.default_accounts).await?;
        let profiles = self
            .seed_profiles(&fixtures.default_profiles, &users)
            .await?;
        let reviews = self
            .seed_reviews(&fixtures.default_reviews, &profiles, &users)
            .await?;

        let outcome = SeedOutcome {
            users,
            profiles,
            reviews,
        };
        info!(
            users = outcome.users.len(),
            profiles = outcome.valid_profile_count(),
            skipped_profiles = outcome.skipped_profile_count(),
            reviews = outcome.reviews.len(),
            "Seeding complete"
        );
        Ok(outcome)
    }

    // ===== Phase 1: users =====

    /// Upsert every account by email, all sharing one password hash.
    pub async fn seed_users(&self, accounts: &[AccountSeed]) -> Result<Vec<User>, SeedError> {
        let password = self.hasher.hash(&self.password).await?;

        let users = try_join_all(accounts.iter().map(|account| {
            let role = Role::from_seed(account.role.as_deref());
            info!("Creating user: {} with role: {}", account.email, role);

            let new_user = NewUser {
                email: account.email.clone(),
                password: password.clone(),
                role,
            };
            async move {
                self.user_repo
                    .upsert_by_email(&new_user)
                    .await
                    .map_err(|e| SeedError::storage("user", e))
            }
        }))
        .await?;

        debug!(
            users = ?users.iter().map(|u| (u.id, u.email.as_str())).collect::<Vec<_>>(),
            "Seeded users"
        );
        Ok(users)
    }

    // ===== Phase 2: profiles =====

    /// Upsert every profile by its owning user.
    ///
    /// The slot of a profile whose `userEmail` matches no seeded user is `None`.
    pub async fn seed_profiles(
        &self,
        seeds: &[ProfileSeed],
        users: &[User],
    ) -> Result<Vec<Option<Profile>>, SeedError> {
        let profiles = try_join_all(
            seeds
                .iter()
                .map(|seed| self.seed_profile(seed, users)),
        )
        .await?;

        debug!(
            valid = profiles.iter().flatten().count(),
            total = profiles.len(),
            "Seeded profiles"
        );
        Ok(profiles)
    }

    async fn seed_profile(
        &self,
        seed: &ProfileSeed,
        users: &[User],
    ) -> Result<Option<Profile>, SeedError> {
        info!("Adding profile: {}", seed.username);

        let Some(user) = users.iter().find(|u| u.email == seed.user_email) else {
            error!("No user found for profile with email: {}", seed.user_email);
            return Ok(None);
        };

        let profile = new_profile(seed, user.id);
        self.profile_repo
            .upsert_by_user_id(&profile)
            .await
            .map(Some)
            .map_err(|e| SeedError::storage("profile", e))
    }

    // ===== Phase 3: reviews =====

    /// Create every review whose profile and reviewer resolve.
    ///
    /// `profiles` is the full slot list from phase 2; empty slots never match.
    pub async fn seed_reviews(
        &self,
        groups: &[ReviewGroup],
        profiles: &[Option<Profile>],
        users: &[User],
    ) -> Result<Vec<Review>, SeedError> {
        let created = try_join_all(
            groups
                .iter()
                .map(|group| self.seed_review_group(group, profiles, users)),
        )
        .await?;

        Ok(created.into_iter().flatten().collect())
    }

    async fn seed_review_group(
        &self,
        group: &ReviewGroup,
        profiles: &[Option<Profile>],
        users: &[User],
    ) -> Result<Vec<Review>, SeedError> {
        debug!(
            profile_id = group.profile_id,
            available = ?profiles.iter().map(|p| p.as_ref().map(|p| p.id)).collect::<Vec<_>>(),
            "Looking for profile"
        );

        let Some(profile) = profiles
            .iter()
            .flatten()
            .find(|p| p.id == group.profile_id)
        else {
            error!("No profile found for ID: {}", group.profile_id);
            return Ok(Vec::new());
        };

        info!("Adding reviews for profile ID: {}", profile.id);
        let created = try_join_all(
            group
                .reviews
                .iter()
                .map(|review| self.seed_review(review, profile, users)),
        )
        .await?;

        Ok(created.into_iter().flatten().collect())
    }

    async fn seed_review(
        &self,
        review: &ReviewSeed,
        profile: &Profile,
        users: &[User],
    ) -> Result<Option<Review>, SeedError> {
        debug!(
            user_id = review.user_id,
            available = ?users.iter().map(|u| u.id).collect::<Vec<_>>(),
            "Looking for reviewer"
        );

        let Some(reviewer) = users.iter().find(|u| u.id == review.user_id) else {
            error!("No user found for reviewer ID: {}", review.user_id);
            return Ok(None);
        };

        let new_review = NewReview {
            rating: review.rating,
            comment: review.comment.clone(),
            profile_id: profile.id,
            user_id: reviewer.id,
            created_at: review.created_at()?,
        };
        self.review_repo
            .create(&new_review)
            .await
            .map(Some)
            .map_err(|e| SeedError::storage("review", e))
    }
}

fn new_profile(seed: &ProfileSeed, user_id: i32) -> NewProfile {
    NewProfile {
        user_id,
        username: seed.username.clone(),
        first_name: seed.first_name.clone(),
        last_name: seed.last_name.clone(),
        image: seed.image.clone(),
        rating: seed.rating,
        musical_goals: seed.musical_goals.clone(),
        musical_tastes: seed.musical_tastes.clone(),
        instruments: seed.instruments.clone(),
        experience: seed.experience,
        description: seed.description.clone(),
    }
}
