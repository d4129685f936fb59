//! SeaORM entities for database tables

/// Users table entity
pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Natural key used by the upsert
        #[sea_orm(unique)]
        pub email: String,

        /// bcrypt hash
        pub password: String,

        /// USER or ADMIN
        pub role: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-one relationship with profiles
        #[sea_orm(has_one = "super::profile::Entity")]
        Profile,
        /// Reviews written by this user
        #[sea_orm(has_many = "super::review::Entity")]
        Review,
    }

    impl Related<super::profile::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Profile.def()
        }
    }

    impl Related<super::review::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Review.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Profiles table entity
pub mod profile {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "profiles")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        /// Owning user; natural key used by the upsert
        #[sea_orm(unique)]
        pub user_id: i32,

        pub username: String,
        pub first_name: String,
        pub last_name: String,
        pub image: Option<String>,
        pub rating: f64,

        /// JSON array of strings
        pub musical_goals: Json,

        /// JSON array of strings
        pub musical_tastes: Json,

        /// JSON array of strings
        pub instruments: Json,

        /// BEGINNER, INTERMEDIATE, ADVANCED or EXPERT
        pub experience: String,

        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id"
        )]
        User,
        /// Reviews left on this profile
        #[sea_orm(has_many = "super::review::Entity")]
        Review,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl Related<super::review::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Review.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Reviews table entity
pub mod review {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "reviews")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub rating: i32,

        #[sea_orm(column_type = "Text")]
        pub comment: String,

        /// Reviewed profile
        pub profile_id: i32,

        /// Reviewer
        pub user_id: i32,

        /// Defaults to the current timestamp in the schema
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::profile::Entity",
            from = "Column::ProfileId",
            to = "super::profile::Column::Id"
        )]
        Profile,
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id"
        )]
        User,
    }

    impl Related<super::profile::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Profile.def()
        }
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
