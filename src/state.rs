use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService, SeaOrmStatusService, StatusService};

/// Application context: constructed once at startup, handed to every
/// component, dropped at shutdown. Nothing in here is process-global.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,

    pub statuses: Arc<dyn StatusService>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let auth: Arc<dyn AuthService> =
            Arc::new(SeaOrmAuthService::new(store.clone(), config.security.clone()));

        let statuses: Arc<dyn StatusService> = Arc::new(SeaOrmStatusService::new(store.clone()));

        Ok(Self {
            config,
            store,
            auth,
            statuses,
        })
    }
}
