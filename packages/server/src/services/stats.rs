use common::StorageBackend;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::content::count_table;
use crate::entity::{
    about_content, event, event_gallery_item, founder, hero, media_asset, mentor_talk, program,
    team_member, testimonial,
};
use crate::error::AppError;
use crate::models::dashboard::{DashboardStats, TableCount};

/// Registry assets; "published" means publicly servable.
async fn count_media<C: ConnectionTrait>(db: &C) -> Result<TableCount, AppError> {
    let total = media_asset::Entity::find().count(db).await?;
    let published = media_asset::Entity::find()
        .filter(media_asset::Column::StorageBackend.eq(StorageBackend::ObjectStorage))
        .filter(media_asset::Column::StoragePath.is_not_null())
        .filter(media_asset::Column::StoragePath.ne(""))
        .count(db)
        .await?;
    Ok(TableCount { total, published })
}

pub async fn dashboard_stats<C: ConnectionTrait>(db: &C) -> Result<DashboardStats, AppError> {
    Ok(DashboardStats {
        hero: count_table::<hero::Entity, C>(db).await?,
        about: count_table::<about_content::Entity, C>(db).await?,
        programs: count_table::<program::Entity, C>(db).await?,
        events: count_table::<event::Entity, C>(db).await?,
        team: count_table::<team_member::Entity, C>(db).await?,
        founders: count_table::<founder::Entity, C>(db).await?,
        testimonials: count_table::<testimonial::Entity, C>(db).await?,
        mentor_talks: count_table::<mentor_talk::Entity, C>(db).await?,
        event_gallery: count_table::<event_gallery_item::Entity, C>(db).await?,
        media: count_media(db).await?,
    })
}
