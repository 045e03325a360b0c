//! `SeaORM` implementation of the `StatusService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::services::status_service::{StatusError, StatusService, StatusValue};

pub struct SeaOrmStatusService {
    store: Store,
}

impl SeaOrmStatusService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatusService for SeaOrmStatusService {
    async fn status_for(
        &self,
        account_id: i32,
        recipe_id: i32,
    ) -> Result<StatusValue, StatusError> {
        let stored = self.store.get_recipe_status(recipe_id, account_id).await?;

        Ok(stored.map_or(StatusValue::NotOwned, |v| {
            StatusValue::try_from(i64::from(v)).unwrap_or_default()
        }))
    }

    async fn set_status(
        &self,
        account_id: i32,
        recipe_id: i32,
        value: i64,
    ) -> Result<StatusValue, StatusError> {
        let status = StatusValue::try_from(value).map_err(StatusError::InvalidStatus)?;

        if self.store.get_recipe(recipe_id).await?.is_none() {
            return Err(StatusError::RecipeNotFound(recipe_id));
        }

        self.store
            .upsert_recipe_status(recipe_id, account_id, status.value())
            .await?;

        Ok(status)
    }
}
