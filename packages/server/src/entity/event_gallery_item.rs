use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_gallery_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Loose reference to an event; galleries outlive the events they show.
    pub event_id: Option<i32>,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub caption: Option<String>,

    pub is_active: bool,
    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    #[sea_orm(has_many)]
    pub media: HasMany<super::event_gallery_media::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
