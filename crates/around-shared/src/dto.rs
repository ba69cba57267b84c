//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to create an account. Missing fields decode as empty/zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub age: i32,
    pub gender: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Raw search query string. Values stay unparsed so bad numbers can
/// degrade instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub range: Option<String>,
}

/// A coordinate as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationView {
    pub lat: f64,
    pub lon: f64,
}

/// A post as returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub user: String,
    pub message: String,
    pub location: LocationView,
    pub url: Option<String>,
}
