//! Authentication and authorization ports.

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub username: String,
    pub exp: i64,
}

/// Token service trait - issues and validates signed access tokens.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a verified username.
    fn generate_token(&self, username: &str) -> Result<String, AuthError>;

    /// Check signature then expiry, returning the embedded claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password storage and comparison.
pub trait PasswordService: Send + Sync {
    /// Produce the value persisted for a password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Compare a supplied password against the persisted value.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token signing failed: {0}")]
    Signing(String),
}
