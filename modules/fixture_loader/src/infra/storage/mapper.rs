//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{profile, review, user};
use crate::contract::{Experience, NewProfile, NewReview, NewUser, Profile, Review, Role, User};
use anyhow::anyhow;

// ===== User Conversions =====

impl TryFrom<user::Model> for User {
    type Error = anyhow::Error;

    fn try_from(entity: user::Model) -> Result<Self, Self::Error> {
        let role = Role::parse(&entity.role)
            .ok_or_else(|| anyhow!("user {} has unknown role '{}'", entity.id, entity.role))?;

        Ok(Self {
            id: entity.id,
            email: entity.email,
            password: entity.password,
            role,
        })
    }
}

impl From<&NewUser> for user::ActiveModel {
    fn from(model: &NewUser) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            email: Set(model.email.clone()),
            password: Set(model.password.clone()),
            role: Set(model.role.as_str().to_string()),
        }
    }
}

// ===== Profile Conversions =====

impl TryFrom<profile::Model> for Profile {
    type Error = anyhow::Error;

    fn try_from(entity: profile::Model) -> Result<Self, Self::Error> {
        let experience = Experience::parse(&entity.experience).ok_or_else(|| {
            anyhow!(
                "profile {} has unknown experience '{}'",
                entity.id,
                entity.experience
            )
        })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            username: entity.username,
            first_name: entity.first_name,
            last_name: entity.last_name,
            image: entity.image,
            rating: entity.rating,
            musical_goals: serde_json::from_value(entity.musical_goals)?,
            musical_tastes: serde_json::from_value(entity.musical_tastes)?,
            instruments: serde_json::from_value(entity.instruments)?,
            experience,
            description: entity.description,
        })
    }
}

impl From<&NewProfile> for profile::ActiveModel {
    fn from(model: &NewProfile) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            user_id: Set(model.user_id),
            username: Set(model.username.clone()),
            first_name: Set(model.first_name.clone()),
            last_name: Set(model.last_name.clone()),
            image: Set(model.image.clone()),
            rating: Set(model.rating),
            musical_goals: Set(model.musical_goals.clone().into()),
            musical_tastes: Set(model.musical_tastes.clone().into()),
            instruments: Set(model.instruments.clone().into()),
            experience: Set(model.experience.as_str().to_string()),
            description: Set(model.description.clone()),
        }
    }
}

// ===== Review Conversions =====

impl From<review::Model> for Review {
    fn from(entity: review::Model) -> Self {
        Self {
            id: entity.id,
            rating: entity.rating,
            comment: entity.comment,
            profile_id: entity.profile_id,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

impl From<&NewReview> for review::ActiveModel {
    fn from(model: &NewReview) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            rating: Set(model.rating),
            comment: Set(model.comment.clone()),
            profile_id: Set(model.profile_id),
            user_id: Set(model.user_id),
            created_at: match model.created_at {
                Some(ts) => Set(ts),
                None => NotSet,
            },
        }
    }
}
