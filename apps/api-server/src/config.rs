//! Application configuration loaded from environment variables.

use std::env;

use around_infra::JwtConfig;
#[cfg(feature = "postgres")]
use around_infra::DatabaseConfig;
#[cfg(feature = "s3")]
use around_infra::S3Config;

/// Default cap on an uploaded image.
const DEFAULT_MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration.
///
/// Built once at startup and handed to each component by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "s3")]
    pub s3: Option<S3Config>,
    pub jwt: JwtConfig,
    pub media: MediaConfig,
}

/// Upload handling settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base URL for objects held by the in-memory media store.
    pub base_url: String,
    pub max_image_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let media = MediaConfig {
            base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| format!("http://{host}:{port}/media")),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
        };

        Self {
            #[cfg(feature = "postgres")]
            database: Self::database_from_env(),
            #[cfg(feature = "s3")]
            s3: S3Config::from_env(),
            jwt: JwtConfig::from_env(),
            media,
            host,
            port,
        }
    }

    #[cfg(feature = "postgres")]
    fn database_from_env() -> Option<DatabaseConfig> {
        env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }
}
