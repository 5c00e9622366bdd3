use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::ObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::s3::{S3ObjectStore, S3Settings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cms_server::config::{AppConfig, StorageBackendKind, StorageConfig};
use cms_server::database::StorageGateway;
use cms_server::media::MediaRegistry;
use cms_server::state::AppState;

async fn object_store(config: &StorageConfig) -> anyhow::Result<Option<Arc<dyn ObjectStore>>> {
    let max_size = config.max_upload_size as u64;
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackendKind::Disabled => {
            warn!("storage.backend is disabled; uploads will be rejected");
            return Ok(None);
        }
        StorageBackendKind::Filesystem => Arc::new(
            FilesystemObjectStore::new(config.root_dir.clone(), &config.bucket, max_size)
                .await
                .context("Failed to initialize filesystem object store")?,
        ),
        StorageBackendKind::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("storage.backend is s3 but storage.s3 is not configured")?;
            Arc::new(
                S3ObjectStore::new(
                    &S3Settings {
                        endpoint: s3.endpoint.clone(),
                        region: s3.region.clone(),
                        bucket: config.bucket.clone(),
                        access_key: s3.access_key.clone(),
                        secret_key: s3.secret_key.clone(),
                    },
                    max_size,
                )
                .context("Failed to initialize S3 object store")?,
            )
        }
    };
    info!(backend = store.backend_name(), bucket = %config.bucket, "Object storage ready");
    Ok(Some(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let gateway = StorageGateway::connect(&config.database).await;
    if let Ok(db) = gateway.handle() {
        cms_server::seed::ensure_indexes(db).await?;
        if let Err(e) = cms_server::seed::seed_admin(db, &config.auth).await {
            warn!(error = %e, "Failed to seed admin account");
        }
    }

    let store = object_store(&config.storage).await?;
    let media = MediaRegistry::new(&config.storage, store);
    if config.storage.public_base_url.is_none() {
        warn!("storage.public_base_url is not set; media URLs cannot be resolved");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host/server.port")?;

    let state = AppState {
        gateway,
        media,
        config,
    };
    let app = cms_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
