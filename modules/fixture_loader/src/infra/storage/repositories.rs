//! SeaORM repository implementations
//!
//! Upserts are `INSERT ... ON CONFLICT DO NOTHING` on the natural key
//! followed by a lookup, so concurrent writers and re-runs leave existing
//! rows untouched.

use crate::contract::{NewProfile, NewReview, NewUser, Profile, Review, User};
use crate::domain::repository::{ProfileRepository, ReviewRepository, UserRepository};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use super::entity::{profile, review, user};

// ===== User Repository =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn upsert_by_email(&self, new_user: &NewUser) -> Result<User> {
        let active: user::ActiveModel = new_user.into();
        user::Entity::insert(active)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        let row = user::Entity::find()
            .filter(user::Column::Email.eq(new_user.email.as_str()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| anyhow!("user {} missing after upsert", new_user.email))?;

        row.try_into()
    }
}

// ===== Profile Repository =====

pub struct SeaOrmProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProfileRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SeaOrmProfileRepository {
    async fn upsert_by_user_id(&self, new_profile: &NewProfile) -> Result<Profile> {
        let active: profile::ActiveModel = new_profile.into();
        profile::Entity::insert(active)
            .on_conflict(
                OnConflict::column(profile::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        let row = profile::Entity::find()
            .filter(profile::Column::UserId.eq(new_profile.user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "profile for user {} missing after upsert",
                    new_profile.user_id
                )
            })?;

        row.try_into()
    }
}

// ===== Review Repository =====

pub struct SeaOrmReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReviewRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(&self, new_review: &NewReview) -> Result<Review> {
        let active: review::ActiveModel = new_review.into();
        let result = review::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }
}
