//! Application state - shared across all handlers.

use std::sync::Arc;

use around_core::ports::{ContentIndex, MediaError, MediaStore, TokenService};
use around_core::services::{CredentialStore, PostIngestionService, ProximitySearchService};
use around_infra::{
    InMemoryContentIndex, InMemoryMediaStore, JwtTokenService, PlaintextPasswordService,
};

use crate::config::AppConfig;

/// Shared application state.
///
/// Everything here is read-only after startup; per-request work happens in
/// the services.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn ContentIndex>,
    pub credentials: Arc<CredentialStore>,
    pub ingestion: Arc<PostIngestionService>,
    pub search: Arc<ProximitySearchService>,
    pub tokens: Arc<dyn TokenService>,
    pub max_image_bytes: usize,
}

/// Fatal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(String),

    #[error("Media store unavailable: {0}")]
    Media(#[from] MediaError),
}

impl AppState {
    /// Wire the services over the given adapters.
    pub fn new(
        index: Arc<dyn ContentIndex>,
        media: Arc<dyn MediaStore>,
        tokens: Arc<dyn TokenService>,
        max_image_bytes: usize,
    ) -> Self {
        let credentials =
            CredentialStore::new(index.clone(), Arc::new(PlaintextPasswordService::new()));

        Self {
            credentials: Arc::new(credentials),
            ingestion: Arc::new(PostIngestionService::new(index.clone(), media)),
            search: Arc::new(ProximitySearchService::new(index.clone())),
            index,
            tokens,
            max_image_bytes,
        }
    }

    /// Build the application state with appropriate implementations.
    ///
    /// A configured backend that cannot be reached aborts startup; an
    /// unconfigured one falls back to memory.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let index = Self::content_index(config).await?;
        let media = Self::media_store(config).await?;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!("Application state initialized");
        Ok(Self::new(index, media, tokens, config.media.max_image_bytes))
    }

    #[cfg(feature = "postgres")]
    async fn content_index(config: &AppConfig) -> Result<Arc<dyn ContentIndex>, StartupError> {
        match &config.database {
            Some(db_config) => {
                let db = around_infra::database::connect(db_config)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                Ok(Arc::new(around_infra::PostgresContentIndex::new(db)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running with in-memory content index.");
                Ok(Arc::new(InMemoryContentIndex::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn content_index(_config: &AppConfig) -> Result<Arc<dyn ContentIndex>, StartupError> {
        tracing::info!("Running without postgres feature - using in-memory content index");
        Ok(Arc::new(InMemoryContentIndex::new()))
    }

    #[cfg(feature = "s3")]
    async fn media_store(config: &AppConfig) -> Result<Arc<dyn MediaStore>, StartupError> {
        match &config.s3 {
            Some(s3_config) => {
                let store = around_infra::S3MediaStore::connect(s3_config.clone()).await?;
                Ok(Arc::new(store))
            }
            None => {
                tracing::warn!("S3_BUCKET not set. Running with in-memory media store.");
                Ok(Arc::new(InMemoryMediaStore::new(config.media.base_url.clone())))
            }
        }
    }

    #[cfg(not(feature = "s3"))]
    async fn media_store(config: &AppConfig) -> Result<Arc<dyn MediaStore>, StartupError> {
        tracing::info!("Running without s3 feature - using in-memory media store");
        Ok(Arc::new(InMemoryMediaStore::new(config.media.base_url.clone())))
    }
}

#[cfg(test)]
mod tests {
    use around_infra::JwtConfig;

    use super::*;
    use crate::config::MediaConfig;

    fn unconfigured() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            #[cfg(feature = "postgres")]
            database: None,
            #[cfg(feature = "s3")]
            s3: None,
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 24,
            },
            media: MediaConfig {
                base_url: "http://media.test".to_string(),
                max_image_bytes: 1024,
            },
        }
    }

    #[actix_rt::test]
    async fn test_unconfigured_backends_fall_back_to_memory() {
        let state = AppState::from_config(&unconfigured()).await.unwrap();

        assert!(state.index.ping().await.is_ok());
        assert_eq!(state.max_image_bytes, 1024);
        let token = state.tokens.generate_token("abc123").unwrap();
        assert_eq!(state.tokens.validate_token(&token).unwrap().username, "abc123");
    }
}
