use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Location, Post, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    AuthError, ContentIndex, MediaError, MediaStore, MediaUpload, PasswordService,
};

use super::*;

/// Index double with switchable failures.
#[derive(Default)]
struct FakeIndex {
    posts: Mutex<Vec<(Uuid, Post)>>,
    users: Mutex<HashMap<String, User>>,
    down: AtomicBool,
}

impl FakeIndex {
    fn check(&self) -> Result<(), RepoError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(RepoError::Connection("index unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentIndex for FakeIndex {
    async fn index_post(&self, id: Uuid, post: Post) -> Result<(), RepoError> {
        self.check()?;
        self.posts.lock().await.push((id, post));
        Ok(())
    }

    async fn geo_search(&self, center: Location, radius_km: f64) -> Result<Vec<Post>, RepoError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .filter(|(_, p)| p.location.distance_km(&center) <= radius_km)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn find_user_by_name(&self, username: &str) -> Result<Option<User>, RepoError> {
        self.check()?;
        Ok(self.users.lock().await.get(username).cloned())
    }

    async fn create_user_if_absent(&self, user: User) -> Result<bool, RepoError> {
        self.check()?;
        let mut users = self.users.lock().await;
        if users.contains_key(&user.username) {
            return Ok(false);
        }
        users.insert(user.username.clone(), user);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.check()
    }
}

#[derive(Default)]
struct FakeMedia {
    stored: Mutex<Vec<String>>,
    fail: AtomicBool,
}

#[async_trait]
impl MediaStore for FakeMedia {
    async fn store(&self, key: &str, _upload: MediaUpload) -> Result<String, MediaError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MediaError::BucketNotFound("post-images".to_string()));
        }
        self.stored.lock().await.push(key.to_string());
        Ok(format!("https://media.test/{key}"))
    }
}

struct EqualityPasswords;

impl PasswordService for EqualityPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        Ok(password == stored)
    }
}

fn credentials(index: Arc<FakeIndex>) -> CredentialStore {
    CredentialStore::new(index, Arc::new(EqualityPasswords))
}

fn submission(message: &str, lat: f64, lon: f64) -> PostSubmission {
    PostSubmission {
        message: message.to_string(),
        location: Location::new(lat, lon),
        image: Some(MediaUpload::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg")),
    }
}

#[tokio::test]
async fn test_create_then_verify() {
    let store = credentials(Arc::new(FakeIndex::default()));

    assert!(store.create(User::new("abc123", "pw1", 30, "m")).await.unwrap());
    assert!(store.verify("abc123", "pw1").await);
}

#[tokio::test]
async fn test_verify_rejects_wrong_password_and_unknown_user() {
    let store = credentials(Arc::new(FakeIndex::default()));
    store.create(User::new("abc123", "pw1", 30, "m")).await.unwrap();

    assert!(!store.verify("abc123", "pw2").await);
    assert!(!store.verify("abc123", "PW1").await);
    assert!(!store.verify("nobody", "pw1").await);
}

#[tokio::test]
async fn test_duplicate_username_is_refused() {
    let store = credentials(Arc::new(FakeIndex::default()));

    assert!(store.create(User::new("abc123", "pw1", 30, "m")).await.unwrap());
    assert!(!store.create(User::new("abc123", "other", 41, "f")).await.unwrap());
    // First registration wins.
    assert!(store.verify("abc123", "pw1").await);
}

#[tokio::test]
async fn test_create_rejects_invalid_username() {
    let store = credentials(Arc::new(FakeIndex::default()));

    let result = store.create(User::new("Bad Name", "pw1", 30, "m")).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_verify_is_false_when_index_down() {
    let index = Arc::new(FakeIndex::default());
    let store = credentials(index.clone());
    store.create(User::new("abc123", "pw1", 30, "m")).await.unwrap();

    index.down.store(true, Ordering::SeqCst);
    assert!(!store.verify("abc123", "pw1").await);
}

#[tokio::test]
async fn test_create_surfaces_index_failure() {
    let index = Arc::new(FakeIndex::default());
    index.down.store(true, Ordering::SeqCst);
    let store = credentials(index);

    let result = store.create(User::new("abc123", "pw1", 30, "m")).await;
    assert!(matches!(result, Err(DomainError::Repository(_))));
}

#[tokio::test]
async fn test_ingest_stores_media_then_indexes() {
    let index = Arc::new(FakeIndex::default());
    let media = Arc::new(FakeMedia::default());
    let service = PostIngestionService::new(index.clone(), media.clone());

    let receipt = service
        .ingest("abc123", submission("hello", 37.0, -120.0))
        .await
        .unwrap();

    assert_eq!(media.stored.lock().await.as_slice(), [receipt.id.to_string()]);
    let posts = index.posts.lock().await;
    assert_eq!(posts.len(), 1);
    let (id, post) = &posts[0];
    assert_eq!(*id, receipt.id);
    assert_eq!(post.author, "abc123");
    assert_eq!(post.location, Location::new(37.0, -120.0));
    assert_eq!(post.media_url.as_deref(), Some(receipt.media_url.as_str()));
}

#[tokio::test]
async fn test_ingest_requires_image() {
    let index = Arc::new(FakeIndex::default());
    let media = Arc::new(FakeMedia::default());
    let service = PostIngestionService::new(index.clone(), media.clone());

    let mut without_image = submission("hello", 37.0, -120.0);
    without_image.image = None;

    let result = service.ingest("abc123", without_image).await;
    assert!(matches!(result, Err(IngestError::MissingImage)));
    assert!(media.stored.lock().await.is_empty());
    assert!(index.posts.lock().await.is_empty());
}

#[tokio::test]
async fn test_media_failure_skips_index_write() {
    let index = Arc::new(FakeIndex::default());
    let media = Arc::new(FakeMedia::default());
    media.fail.store(true, Ordering::SeqCst);
    let service = PostIngestionService::new(index.clone(), media);

    let result = service.ingest("abc123", submission("hello", 37.0, -120.0)).await;
    assert!(matches!(result, Err(IngestError::Media(_))));
    assert!(index.posts.lock().await.is_empty());
}

#[tokio::test]
async fn test_index_failure_leaves_media_in_place() {
    let index = Arc::new(FakeIndex::default());
    index.down.store(true, Ordering::SeqCst);
    let media = Arc::new(FakeMedia::default());
    let service = PostIngestionService::new(index, media.clone());

    let result = service.ingest("abc123", submission("hello", 37.0, -120.0)).await;
    assert!(matches!(result, Err(IngestError::Index(_))));
    assert_eq!(media.stored.lock().await.len(), 1);
}

#[tokio::test]
async fn test_search_filters_denylisted_messages() {
    let index = Arc::new(FakeIndex::default());
    let media = Arc::new(FakeMedia::default());
    let ingest = PostIngestionService::new(index.clone(), media);
    for message in ["hello", "well shit happens", "ship", "Shit"] {
        ingest
            .ingest("abc123", submission(message, 37.0, -120.0))
            .await
            .unwrap();
    }

    let search = ProximitySearchService::new(index);
    let posts = search
        .search(ProximityQuery::from_raw(Some("37.0"), Some("-120.0"), Some("5")))
        .await
        .unwrap();

    let messages: Vec<&str> = posts.iter().map(|p| p.message.as_str()).collect();
    assert_eq!(messages, ["hello", "ship", "Shit"]);
}

#[tokio::test]
async fn test_search_excludes_distant_posts() {
    let index = Arc::new(FakeIndex::default());
    let ingest = PostIngestionService::new(index.clone(), Arc::new(FakeMedia::default()));
    ingest
        .ingest("abc123", submission("hello", 37.0, -120.0))
        .await
        .unwrap();

    let search = ProximitySearchService::new(index);
    // Roughly 500 km north.
    let far = ProximityQuery::from_raw(Some("41.5"), Some("-120.0"), Some("0.001"));
    assert!(search.search(far).await.unwrap().is_empty());
}

#[test]
fn test_query_defaults() {
    let query = ProximityQuery::from_raw(Some("abc"), None, None);
    assert_eq!(query.center, Location::new(0.0, 0.0));
    assert_eq!(query.range_km, DEFAULT_RANGE_KM);

    let query = ProximityQuery::from_raw(Some("37"), Some("-120"), Some("12.5"));
    assert_eq!(query.center, Location::new(37.0, -120.0));
    assert_eq!(query.range_km, 12.5);

    assert_eq!(
        ProximityQuery::from_raw(None, None, Some("far")).range_km,
        DEFAULT_RANGE_KM
    );
    assert_eq!(
        ProximityQuery::from_raw(None, None, Some("")).range_km,
        DEFAULT_RANGE_KM
    );
}
