use common::StorageBackend;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered binary asset.
///
/// Associations reference assets by id without a foreign key: deleting an
/// asset leaves its associations in place, and they stop resolving.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub mime_type: String,
    pub storage_backend: StorageBackend,

    /// Object key inside the public bucket. `None` means not publicly servable.
    pub storage_path: Option<String>,
    /// Archive reference kept for auditing only; never turned into a URL.
    pub archive_ref: Option<String>,
    pub size: Option<i64>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
