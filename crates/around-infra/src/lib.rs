//! # Around Infrastructure
//!
//! Concrete implementations of the ports defined in `around-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL content index via SeaORM
//! - `auth` - JWT token service and password comparison
//! - `s3` - S3 media store

pub mod index;
pub mod media;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use index::InMemoryContentIndex;
pub use media::InMemoryMediaStore;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService, PlaintextPasswordService};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresContentIndex};

#[cfg(feature = "s3")]
pub use media::{S3Config, S3MediaStore};
