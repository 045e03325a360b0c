use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entities::{prelude::*, recipe_status};

/// Repository for the per-(recipe, account) status rows.
pub struct StatusRepository {
    conn: DatabaseConnection,
}

impl StatusRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Stored status for a (recipe, account) pair; `None` when the pair has
    /// never been written.
    pub async fn get(&self, recipe_id: i32, account_id: i32) -> Result<Option<i32>> {
        let row = RecipeStatus::find_by_id((recipe_id, account_id))
            .one(&self.conn)
            .await
            .context("Failed to query recipe status")?;

        Ok(row.map(|r| r.status))
    }

    /// Create-or-update the status row for a pair as one atomic statement,
    /// keyed by the composite primary key. Concurrent writers to the same
    /// pair cannot produce duplicate rows; the last write wins.
    pub async fn upsert(&self, recipe_id: i32, account_id: i32, status: i32) -> Result<()> {
        let active = recipe_status::ActiveModel {
            recipe_id: Set(recipe_id),
            account_id: Set(account_id),
            status: Set(status),
        };

        RecipeStatus::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    recipe_status::Column::RecipeId,
                    recipe_status::Column::AccountId,
                ])
                .update_columns([recipe_status::Column::Status])
                .to_owned(),
            )
            .exec(&self.conn)
            .await
            .context("Failed to upsert recipe status")?;

        Ok(())
    }
}
