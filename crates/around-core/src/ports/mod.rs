//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod content_index;
mod media_store;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use content_index::ContentIndex;
pub use media_store::{MediaError, MediaStore, MediaUpload};
