use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Location, Post, User};
use crate::error::RepoError;

/// Searchable store holding both posts and user records.
///
/// Every write must be visible to the very next read on any connection,
/// since a post is searched and a new user logs in right after creation.
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Upsert a post under a caller-assigned id.
    async fn index_post(&self, id: Uuid, post: Post) -> Result<(), RepoError>;

    /// All posts within `radius_km` great-circle kilometers of `center`,
    /// boundary included. Order is backend-defined.
    async fn geo_search(&self, center: Location, radius_km: f64)
    -> Result<Vec<Post>, RepoError>;

    /// Point lookup of a user by username.
    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Atomically insert `user` unless the username is taken.
    /// Returns `Ok(false)` when a record already exists.
    async fn create_user_if_absent(&self, user: User) -> Result<bool, RepoError>;

    /// Cheap reachability probe.
    async fn ping(&self) -> Result<(), RepoError>;
}
