use std::sync::Arc;

use super::{
    config::Config,
    database::{Database, init_database},
};

pub struct AppState {
    pub config: Config,
    pub database: Database,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();
        let database = init_database(&config.data_dir).await;

        Arc::new(Self { config, database })
    }
}
