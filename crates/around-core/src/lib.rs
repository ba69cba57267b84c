//! # Around Core
//!
//! The domain layer of the Around geo-post service.
//! Pure business logic: records, the moderation filter, the ports the
//! infrastructure implements, and the services that orchestrate them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
