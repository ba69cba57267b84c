//! Document entity for SeaORM.
//!
//! Posts and users share one `documents` table, told apart by `kind`.
//! Post rows are keyed by their UUID, user rows by the username; the two
//! key spaces cannot collide because usernames never contain `-`.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use around_core::domain::{Location, Post, User};
use around_core::error::RepoError;

pub const KIND_POST: &str = "post";
pub const KIND_USER: &str = "user";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub username: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub url: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Row for a post stored under `id`.
    pub fn from_post(id: Uuid, post: Post) -> Self {
        Self {
            id: Set(id.to_string()),
            kind: Set(KIND_POST.to_string()),
            username: Set(post.author),
            message: Set(Some(post.message)),
            latitude: Set(Some(post.location.latitude)),
            longitude: Set(Some(post.location.longitude)),
            url: Set(post.media_url),
            password: Set(None),
            age: Set(None),
            gender: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        }
    }

    /// Row for a user, keyed by username.
    pub fn from_user(user: User) -> Self {
        Self {
            id: Set(user.username.clone()),
            kind: Set(KIND_USER.to_string()),
            username: Set(user.username),
            message: Set(None),
            latitude: Set(None),
            longitude: Set(None),
            url: Set(None),
            password: Set(Some(user.password)),
            age: Set(Some(user.age)),
            gender: Set(Some(user.gender)),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        if model.kind != KIND_POST {
            return Err(RepoError::Corrupt(format!(
                "document {} is a {}, not a post",
                model.id, model.kind
            )));
        }
        let (Some(latitude), Some(longitude)) = (model.latitude, model.longitude) else {
            return Err(RepoError::Corrupt(format!(
                "post {} has no location",
                model.id
            )));
        };

        Ok(Post {
            author: model.username,
            message: model.message.unwrap_or_default(),
            location: Location::new(latitude, longitude),
            media_url: model.url,
        })
    }
}

/// Conversion from SeaORM Model to Domain User.
impl TryFrom<Model> for User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        if model.kind != KIND_USER {
            return Err(RepoError::Corrupt(format!(
                "document {} is a {}, not a user",
                model.id, model.kind
            )));
        }
        let Some(password) = model.password else {
            return Err(RepoError::Corrupt(format!(
                "user {} has no password",
                model.id
            )));
        };

        Ok(User {
            username: model.username,
            password,
            age: model.age.unwrap_or_default(),
            gender: model.gender.unwrap_or_default(),
        })
    }
}
