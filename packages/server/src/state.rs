use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::database::StorageGateway;
use crate::error::AppError;
use crate::media::MediaRegistry;

#[derive(Clone)]
pub struct AppState {
    pub gateway: StorageGateway,
    pub media: MediaRegistry,
    pub config: AppConfig,
}

impl AppState {
    /// Database handle, or `NOT_CONFIGURED` when running degraded.
    pub fn db(&self) -> Result<&DatabaseConnection, AppError> {
        self.gateway.handle()
    }
}
