use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Landing-page hero banner. At most one row is active at a time.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub subtitle: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,

    pub is_active: bool,
    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    #[sea_orm(has_many)]
    pub media: HasMany<super::hero_media::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
