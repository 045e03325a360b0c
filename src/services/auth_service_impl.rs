//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::db::{Account, Store};
use crate::services::auth_service::{AuthError, AuthService, validate_registration};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Account, AuthError> {
        validate_registration(username, password, confirm_password)?;

        // The insert itself reports a taken username, so a racing duplicate
        // registration loses instead of slipping past a lookup.
        let account = self
            .store
            .create_account(username, password, &self.security)
            .await?
            .ok_or(AuthError::DuplicateUsername)?;

        Ok(account)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .store
            .verify_account_credentials(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(account)
    }

    async fn account_by_id(&self, id: i32) -> Result<Option<Account>, AuthError> {
        let account = self.store.get_account_by_id(id).await?;
        Ok(account)
    }
}
