use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::AppError;

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("cms_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Handle to the relational store, shared by every service.
///
/// A gateway without a connection is valid: the service then runs degraded
/// and every caller asking for a [`handle`](Self::handle) gets
/// `AppError::NotConfigured`.
#[derive(Clone, Debug)]
pub struct StorageGateway {
    conn: Option<DatabaseConnection>,
}

impl StorageGateway {
    /// Connect using `config`. Never fails; problems are logged and the
    /// gateway comes up disconnected.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            warn!("database.url is not set; running without a database");
            return Self::disconnected();
        };

        match init_db(url).await {
            Ok(conn) => {
                info!("Connected to database");
                Self { conn: Some(conn) }
            }
            Err(e) => {
                warn!(error = %e, "Database unreachable; running without a database");
                Self::disconnected()
            }
        }
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn: Some(conn) }
    }

    pub fn disconnected() -> Self {
        Self { conn: None }
    }

    pub fn is_configured(&self) -> bool {
        self.conn.is_some()
    }

    pub fn handle(&self) -> Result<&DatabaseConnection, AppError> {
        self.conn
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Database is not configured".into()))
    }

    /// Round-trip to the store.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.handle()?.ping().await.map_err(AppError::from)
    }
}
