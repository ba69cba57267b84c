//! S3 media store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use around_core::ports::{MediaError, MediaStore, MediaUpload};

/// S3 bucket configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket holding post images.
    pub bucket: String,
    /// AWS region.
    pub region: String,
    /// Base URL for public access.
    pub base_url: String,
    /// Whether to use path-style URLs (false = virtual-hosted-style).
    pub path_style: bool,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint: Option<String>,
}

impl S3Config {
    /// Load configuration from environment variables.
    /// Returns `None` when `S3_BUCKET` is unset.
    pub fn from_env() -> Option<Self> {
        let bucket = std::env::var("S3_BUCKET").ok()?;

        Some(Self {
            bucket,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("S3_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
            path_style: std::env::var("S3_PATH_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
        })
    }

    /// Public URL of an object.
    pub fn object_url(&self, key: &str) -> String {
        if self.path_style {
            format!(
                "{}/{}/{}",
                self.base_url.trim_end_matches('/'),
                self.bucket,
                key
            )
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }
}

/// Writes post images to an S3 bucket with a public-read ACL.
pub struct S3MediaStore {
    client: Client,
    config: S3Config,
}

impl S3MediaStore {
    /// Build a client from the ambient AWS credentials and confirm the bucket exists.
    pub async fn connect(config: S3Config) -> Result<Self, MediaError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let store = Self {
            client: Client::from_conf(builder.build()),
            config,
        };
        store.check_bucket().await?;
        Ok(store)
    }

    async fn check_bucket(&self) -> Result<(), MediaError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| {
                MediaError::BucketNotFound(format!(
                    "{}: {}",
                    self.config.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;

        tracing::info!(bucket = %self.config.bucket, "Media bucket reachable");
        Ok(())
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn store(&self, key: &str, upload: MediaUpload) -> Result<String, MediaError> {
        let size = upload.bytes.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(upload.content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(upload.bytes))
            .send()
            .await
            .map_err(|e| match e.code() {
                Some("NoSuchBucket") => MediaError::BucketNotFound(self.config.bucket.clone()),
                Some("AccessControlListNotSupported") | Some("InvalidArgument") => {
                    MediaError::Acl(DisplayErrorContext(&e).to_string())
                }
                _ => MediaError::Upload(DisplayErrorContext(&e).to_string()),
            })?;

        tracing::info!(bucket = %self.config.bucket, %key, size, "Media object stored");
        Ok(self.config.object_url(key))
    }
}
