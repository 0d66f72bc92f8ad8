use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::DbPool;
use crate::modules::stream::supervisor::StreamSupervisor;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub supervisor: Arc<StreamSupervisor>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, supervisor: Arc<StreamSupervisor>) -> Self {
        Self {
            config,
            db,
            supervisor,
        }
    }
}
