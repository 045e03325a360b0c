//! Domain service for account registration and login.
//!
//! Sessions themselves live at the HTTP boundary; this layer only decides
//! whether a set of credentials maps to an account.

use thiserror::Error;

use crate::db::Account;

pub const USERNAME_MIN_CHARS: usize = 4;
pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 4;
pub const PASSWORD_MAX_CHARS: usize = 20;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// The one capability session plumbing needs from an account holder: a
/// stable id to stash in the session and rehydrate on later requests.
pub trait AuthenticatedIdentity {
    fn id(&self) -> i32;
}

impl AuthenticatedIdentity for Account {
    fn id(&self) -> i32 {
        self.id
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account from credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when a field is out of bounds or the
    /// confirmation does not match, and [`AuthError::DuplicateUsername`] when
    /// the name is taken.
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account, AuthError>;

    /// Verifies credentials and returns the matching account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on failure; deliberately the
    /// same error whether the username is unknown or the password is wrong.
    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Rehydrates the account behind a session id; `None` when the account no
    /// longer exists.
    async fn account_by_id(&self, id: i32) -> Result<Option<Account>, AuthError>;
}

/// Field rules shared by registration: 4-20 characters for both the username
/// and the password, and the confirmation must match.
pub(crate) fn validate_registration(
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    let username_chars = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_chars) {
        return Err(AuthError::Validation(format!(
            "Username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
        )));
    }

    let password_chars = password.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&password_chars) {
        return Err(AuthError::Validation(format!(
            "Password must be between {PASSWORD_MIN_CHARS} and {PASSWORD_MAX_CHARS} characters"
        )));
    }

    if password != confirm_password {
        return Err(AuthError::Validation(
            "Passwords do not match".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(validate_registration("abcd", "abcd", "abcd").is_ok());
        let twenty = "a".repeat(20);
        assert!(validate_registration(&twenty, &twenty, &twenty).is_ok());
    }

    #[test]
    fn rejects_short_and_long_usernames() {
        assert!(matches!(
            validate_registration("abc", "validpw", "validpw"),
            Err(AuthError::Validation(_))
        ));
        let long = "a".repeat(21);
        assert!(matches!(
            validate_registration(&long, "validpw", "validpw"),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn rejects_out_of_bounds_passwords() {
        assert!(matches!(
            validate_registration("valid_user", "abc", "abc"),
            Err(AuthError::Validation(_))
        ));
        let long = "p".repeat(21);
        assert!(matches!(
            validate_registration("valid_user", &long, &long),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        assert!(matches!(
            validate_registration("valid_user", "password", "passwore"),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Four characters, eight bytes in UTF-8.
        assert!(validate_registration("côté", "pâté", "pâté").is_ok());
    }
}
