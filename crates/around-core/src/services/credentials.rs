use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{ContentIndex, PasswordService};

/// Verifies and registers username/password pairs against the content index.
pub struct CredentialStore {
    index: Arc<dyn ContentIndex>,
    passwords: Arc<dyn PasswordService>,
}

impl CredentialStore {
    pub fn new(index: Arc<dyn ContentIndex>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { index, passwords }
    }

    /// True only if `username` exists and its stored password matches.
    ///
    /// An unreachable index, an unknown user and a wrong password all
    /// yield `false`; callers cannot tell them apart.
    pub async fn verify(&self, username: &str, password: &str) -> bool {
        let user = match self.index.find_user_by_name(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(%username, error = %e, "Credential lookup failed");
                return false;
            }
        };

        if user.username != username {
            return false;
        }

        self.passwords
            .verify(password, &user.password)
            .unwrap_or_else(|e| {
                tracing::warn!(%username, error = %e, "Password comparison failed");
                false
            })
    }

    /// Register a new user. `Ok(false)` means the username is taken.
    pub async fn create(&self, user: User) -> Result<bool, DomainError> {
        user.validate()?;

        let stored = self
            .passwords
            .hash(&user.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let user = User {
            password: stored,
            ..user
        };

        let username = user.username.clone();
        let created = self.index.create_user_if_absent(user).await?;
        if created {
            tracing::info!(%username, "User added");
        } else {
            tracing::info!(%username, "User already exists, refusing duplicate");
        }
        Ok(created)
    }
}
