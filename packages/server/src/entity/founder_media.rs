use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "founder_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub founder_id: i32,
    #[sea_orm(belongs_to, from = "founder_id", to = "id")]
    pub founder: HasOne<super::founder::Entity>,

    pub media_id: Option<i32>,
    pub media_url: Option<String>,
    pub media_type: String,
    pub alt_text: Option<String>,
    pub display_order: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
