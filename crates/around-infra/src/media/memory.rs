//! In-memory media store - used when no bucket is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use around_core::ports::{MediaError, MediaStore, MediaUpload};

/// Keeps uploaded blobs in a HashMap and hands out URLs under `base_url`.
///
/// The URLs are not served by anything; this store exists for local runs
/// and tests.
/// Note: Data is lost on process restart.
pub struct InMemoryMediaStore {
    base_url: String,
    objects: RwLock<HashMap<String, MediaUpload>>,
}

impl InMemoryMediaStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> Option<MediaUpload> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(&self, key: &str, upload: MediaUpload) -> Result<String, MediaError> {
        let size = upload.bytes.len();
        self.objects.write().await.insert(key.to_string(), upload);

        tracing::debug!(%key, size, "Media object stored in memory");
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_get() {
        let store = InMemoryMediaStore::new("http://localhost:8080/media/");

        let url = store
            .store("p1", MediaUpload::new(vec![1, 2, 3], "image/png"))
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/media/p1");
        let object = store.get("p1").await.unwrap();
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type, "image/png");
        assert!(store.get("p2").await.is_none());
    }
}
