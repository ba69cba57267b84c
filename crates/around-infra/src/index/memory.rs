//! In-memory content index - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use around_core::domain::{Location, Post, User};
use around_core::error::RepoError;
use around_core::ports::ContentIndex;

#[derive(Default)]
struct Documents {
    posts: HashMap<Uuid, Post>,
    users: HashMap<String, User>,
}

/// In-memory content index using HashMaps behind one async RwLock.
///
/// Writes are visible as soon as the lock is released. Geo queries are a
/// linear haversine scan.
/// Note: Data is lost on process restart.
pub struct InMemoryContentIndex {
    store: RwLock<Documents>,
}

impl InMemoryContentIndex {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Documents::default()),
        }
    }
}

impl Default for InMemoryContentIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentIndex for InMemoryContentIndex {
    async fn index_post(&self, id: Uuid, post: Post) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.insert(id, post);
        Ok(())
    }

    async fn geo_search(&self, center: Location, radius_km: f64) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .values()
            .filter(|p| p.location.distance_km(&center) <= radius_km)
            .cloned()
            .collect())
    }

    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.users.get(username).cloned())
    }

    async fn create_user_if_absent(&self, user: User) -> Result<bool, RepoError> {
        // Check and insert under one write guard so concurrent signups cannot both win.
        let mut store = self.store.write().await;
        if store.users.contains_key(&user.username) {
            return Ok(false);
        }
        store.users.insert(user.username.clone(), user);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn post_at(message: &str, lat: f64, lon: f64) -> Post {
        Post::new("abc123", message, Location::new(lat, lon), None)
    }

    #[tokio::test]
    async fn test_geo_search_includes_boundary_excludes_beyond() {
        let index = InMemoryContentIndex::new();
        let center = Location::new(0.0, 0.0);
        let edge = Location::new(1.0, 0.0);
        let r = edge.distance_km(&center);

        index
            .index_post(Uuid::new_v4(), post_at("edge", 1.0, 0.0))
            .await
            .unwrap();

        assert_eq!(index.geo_search(center, r).await.unwrap().len(), 1);
        assert!(index.geo_search(center, r - 1e-6).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_geo_search_matches_distance_predicate() {
        let index = InMemoryContentIndex::new();
        let points = [(37.0, -120.0), (37.01, -120.0), (37.5, -120.0), (40.0, -120.0)];
        for (lat, lon) in points {
            index
                .index_post(Uuid::new_v4(), post_at("p", lat, lon))
                .await
                .unwrap();
        }

        let center = Location::new(37.0, -120.0);
        for radius in [0.0, 1.0, 2.0, 60.0, 400.0] {
            let expected = points
                .iter()
                .filter(|(lat, lon)| Location::new(*lat, *lon).distance_km(&center) <= radius)
                .count();
            let found = index.geo_search(center, radius).await.unwrap();
            assert_eq!(found.len(), expected, "radius {radius}");
        }
    }

    #[tokio::test]
    async fn test_index_post_upserts_by_id() {
        let index = InMemoryContentIndex::new();
        let id = Uuid::new_v4();

        index.index_post(id, post_at("first", 0.0, 0.0)).await.unwrap();
        index.index_post(id, post_at("second", 0.0, 0.0)).await.unwrap();

        let posts = index.geo_search(Location::new(0.0, 0.0), 1.0).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].message, "second");
    }

    #[tokio::test]
    async fn test_create_user_if_absent() {
        let index = InMemoryContentIndex::new();

        assert!(index
            .create_user_if_absent(User::new("abc123", "pw1", 20, "f"))
            .await
            .unwrap());
        assert!(!index
            .create_user_if_absent(User::new("abc123", "pw2", 20, "f"))
            .await
            .unwrap());

        let user = index.find_user_by_name("abc123").await.unwrap().unwrap();
        assert_eq!(user.password, "pw1");
        assert!(index.find_user_by_name("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_signups_have_one_winner() {
        let index = Arc::new(InMemoryContentIndex::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let index = index.clone();
                tokio::spawn(async move {
                    index
                        .create_user_if_absent(User::new("racer", format!("pw{i}"), 20, "m"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
