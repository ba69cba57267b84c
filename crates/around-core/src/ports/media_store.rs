use async_trait::async_trait;

/// An uploaded blob, fully drained from the request.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl MediaUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Object storage for post images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `upload` under `key` with public-read access and return its URL.
    async fn store(&self, key: &str, upload: MediaUpload) -> Result<String, MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Failed to set public access: {0}")]
    Acl(String),
}
