use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// User entity - an account that can sign in and post.
///
/// The password is stored and compared as plain text. This is a known
/// deficiency; see `PasswordService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub gender: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        age: i32,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            age,
            gender: gender.into(),
        }
    }

    /// Username must be non-empty `[a-z0-9_]`; password must be non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.password.is_empty() || !is_valid_username(&self.username) {
            return Err(DomainError::Validation(
                "Username and/or password is invalid".to_string(),
            ));
        }
        Ok(())
    }
}

/// Matches `^[a-z0-9_]+$`.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_pattern() {
        assert!(is_valid_username("abc123"));
        assert!(is_valid_username("snake_case_9"));
        assert!(is_valid_username("_"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("Abc"));
        assert!(!is_valid_username("with space"));
        assert!(!is_valid_username("dash-ed"));
        assert!(!is_valid_username("ünï"));
    }

    #[test]
    fn test_validate_requires_password() {
        assert!(User::new("abc123", "pw1", 20, "f").validate().is_ok());
        assert!(matches!(
            User::new("abc123", "", 20, "f").validate(),
            Err(DomainError::Validation(_))
        ));
        assert!(User::new("ABC", "pw1", 20, "f").validate().is_err());
    }

    #[test]
    fn test_missing_profile_fields_default() {
        let user: User =
            serde_json::from_str(r#"{"username":"abc123","password":"pw1"}"#).unwrap();
        assert_eq!(user.age, 0);
        assert_eq!(user.gender, "");
    }
}
