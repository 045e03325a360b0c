use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::recipes;

pub mod migrator;
pub mod repositories;

pub use repositories::account::Account;
pub use repositories::recipe::RecipeWithIngredients;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to :memory: would open its own empty
        // database; clamp to one so queries and sessions share the store.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Underlying sqlx pool; the session store writes to the same database.
    #[must_use]
    pub fn sqlite_pool(&self) -> sea_orm::sqlx::SqlitePool {
        self.conn.get_sqlite_connection_pool().clone()
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn status_repo(&self) -> repositories::status::StatusRepository {
        repositories::status::StatusRepository::new(self.conn.clone())
    }

    // ========== Account Repository Methods ==========

    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<Account>> {
        self.account_repo()
            .create(username, password, security)
            .await
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn verify_account_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        self.account_repo()
            .verify_credentials(username, password)
            .await
    }

    // ========== Recipe Repository Methods ==========

    pub async fn list_recipes(&self) -> Result<Vec<recipes::Model>> {
        self.recipe_repo().list_all().await
    }

    pub async fn get_recipe(&self, id: i32) -> Result<Option<recipes::Model>> {
        self.recipe_repo().get(id).await
    }

    pub async fn get_recipe_with_ingredients(
        &self,
        id: i32,
    ) -> Result<Option<RecipeWithIngredients>> {
        self.recipe_repo().get_with_ingredients(id).await
    }

    // ========== Status Repository Methods ==========

    pub async fn get_recipe_status(
        &self,
        recipe_id: i32,
        account_id: i32,
    ) -> Result<Option<i32>> {
        self.status_repo().get(recipe_id, account_id).await
    }

    pub async fn upsert_recipe_status(
        &self,
        recipe_id: i32,
        account_id: i32,
        status: i32,
    ) -> Result<()> {
        self.status_repo()
            .upsert(recipe_id, account_id, status)
            .await
    }
}
