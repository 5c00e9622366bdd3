use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// "About us" section. Same single-active rule as the hero banner.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub mission: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub vision: Option<String>,

    pub is_active: bool,
    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    #[sea_orm(has_many)]
    pub media: HasMany<super::about_media::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
