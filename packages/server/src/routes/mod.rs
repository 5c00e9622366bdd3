mod v1;

use axum::Router;

use crate::config::StorageConfig;
use crate::state::AppState;

pub fn api_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new().nest("/v1", v1::routes(storage))
}
