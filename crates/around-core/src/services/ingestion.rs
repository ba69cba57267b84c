use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Location, Post};
use crate::error::RepoError;
use crate::ports::{ContentIndex, MediaError, MediaStore, MediaUpload};

/// Fields parsed from a post submission.
#[derive(Debug, Clone)]
pub struct PostSubmission {
    pub message: String,
    pub location: Location,
    pub image: Option<MediaUpload>,
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone)]
pub struct PostReceipt {
    pub id: Uuid,
    pub media_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Image is required")]
    MissingImage,

    #[error("Failed to store media: {0}")]
    Media(#[from] MediaError),

    #[error("Failed to index post: {0}")]
    Index(#[from] RepoError),
}

/// Stores the image, then indexes the post. Stops at the first failure.
///
/// A media object stored before a failed index write is left in place; its
/// key is never referenced again.
pub struct PostIngestionService {
    index: Arc<dyn ContentIndex>,
    media: Arc<dyn MediaStore>,
}

impl PostIngestionService {
    pub fn new(index: Arc<dyn ContentIndex>, media: Arc<dyn MediaStore>) -> Self {
        Self { index, media }
    }

    /// Ingest a submission on behalf of the authenticated `author`.
    pub async fn ingest(
        &self,
        author: &str,
        submission: PostSubmission,
    ) -> Result<PostReceipt, IngestError> {
        let PostSubmission {
            message,
            location,
            image,
        } = submission;
        let image = image.ok_or(IngestError::MissingImage)?;

        let id = Uuid::new_v4();
        let media_url = self.media.store(&id.to_string(), image).await?;

        let post = Post::new(author, message, location, Some(media_url.clone()));
        if let Err(e) = self.index.index_post(id, post).await {
            tracing::error!(
                post_id = %id,
                %media_url,
                error = %e,
                "Index write failed, media object orphaned"
            );
            return Err(e.into());
        }

        tracing::info!(post_id = %id, %author, "Post is saved to index");
        Ok(PostReceipt { id, media_url })
    }
}
