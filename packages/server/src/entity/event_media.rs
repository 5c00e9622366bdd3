use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub event_id: i32,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: HasOne<super::event::Entity>,

    /// Registry asset; `None` only on legacy rows that carry a bare URL.
    pub media_id: Option<i32>,
    /// URL snapshotted at write time, or the legacy URL when `media_id` is unset.
    pub media_url: Option<String>,
    pub media_type: String,
    pub alt_text: Option<String>,
    pub display_order: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
