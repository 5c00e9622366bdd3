use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Postgres connection URL. When unset the service runs degraded:
    /// reads return empty results and writes fail with `NOT_CONFIGURED`.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Seeded at startup when both username and password are set.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

/// Which object store receives uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Disabled,
    Filesystem,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Base endpoint public URLs are built from. Missing base endpoint is a
    /// configuration error at URL-resolution time.
    pub public_base_url: Option<String>,
    pub bucket: String,
    pub backend: StorageBackendKind,
    pub root_dir: PathBuf,
    pub max_upload_size: usize,
    pub s3: Option<S3Config>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

/// Environment variables reported by `/health/env`, paired with a check on
/// the loaded configuration.
pub const REPORTED_SETTINGS: &[&str] = &[
    "CMS__DATABASE__URL",
    "CMS__AUTH__JWT_SECRET",
    "CMS__AUTH__ADMIN_USERNAME",
    "CMS__AUTH__ADMIN_PASSWORD",
    "CMS__STORAGE__PUBLIC_BASE_URL",
    "CMS__STORAGE__BUCKET",
    "CMS__STORAGE__BACKEND",
    "CMS__STORAGE__S3__ACCESS_KEY",
    "CMS__STORAGE__S3__SECRET_KEY",
];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.token_ttl_hours", 168)?
            .set_default("storage.bucket", "media")?
            .set_default("storage.backend", "disabled")?
            .set_default("storage.root_dir", "./data/objects")?
            .set_default("storage.max_upload_size", 50 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CMS__DATABASE__URL)
            .add_source(Environment::with_prefix("CMS").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Whether a reported setting has a value in the loaded configuration.
    pub fn is_set(&self, setting: &str) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        match setting {
            "CMS__DATABASE__URL" => present(&self.database.url),
            "CMS__AUTH__JWT_SECRET" => !self.auth.jwt_secret.is_empty(),
            "CMS__AUTH__ADMIN_USERNAME" => present(&self.auth.admin_username),
            "CMS__AUTH__ADMIN_PASSWORD" => present(&self.auth.admin_password),
            "CMS__STORAGE__PUBLIC_BASE_URL" => present(&self.storage.public_base_url),
            "CMS__STORAGE__BUCKET" => !self.storage.bucket.is_empty(),
            "CMS__STORAGE__BACKEND" => self.storage.backend != StorageBackendKind::Disabled,
            "CMS__STORAGE__S3__ACCESS_KEY" => self
                .storage
                .s3
                .as_ref()
                .is_some_and(|s3| !s3.access_key.is_empty()),
            "CMS__STORAGE__S3__SECRET_KEY" => self
                .storage
                .s3
                .as_ref()
                .is_some_and(|s3| !s3.secret_key.is_empty()),
            _ => std::env::var_os(setting).is_some(),
        }
    }
}
