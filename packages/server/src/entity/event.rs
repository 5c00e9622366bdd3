use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: Option<String>,
    pub event_date: DateTimeUtc,
    /// `upcoming` or `past`, as submitted. Timing flags are derived on read.
    pub category: String,
    pub registration_link: Option<String>,

    pub is_active: bool,
    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    #[sea_orm(has_many)]
    pub media: HasMany<super::event_media::Entity>,

    #[sea_orm(has_many)]
    pub highlights: HasMany<super::event_highlight::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
