use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::content;
use crate::entity::{event_gallery_item, event_gallery_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::gallery::{
    CreateGalleryItemRequest, GalleryItemResponse, UpdateGalleryItemRequest,
};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<event_gallery_media::Entity> = AssociationReconciler::new();

/// Photo and video sets from past events.
pub struct GalleryService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> GalleryService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(
        &self,
        rows: Vec<event_gallery_item::Model>,
    ) -> Result<Vec<GalleryItemResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                GalleryItemResponse::new(r, items)
            })
            .collect())
    }

    /// Published items, optionally limited to one event.
    pub async fn public(&self, event_id: Option<i32>) -> Result<Vec<GalleryItemResponse>, AppError> {
        let mut query = event_gallery_item::Entity::find()
            .filter(event_gallery_item::Column::IsActive.eq(true));
        if let Some(event_id) = event_id {
            query = query.filter(event_gallery_item::Column::EventId.eq(event_id));
        }
        let rows = query
            .order_by_asc(event_gallery_item::Column::DisplayOrder)
            .order_by_asc(event_gallery_item::Column::Id)
            .all(self.db)
            .await?;
        self.with_media(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<GalleryItemResponse>, AppError> {
        let rows = content::list_ordered::<event_gallery_item::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<GalleryItemResponse, AppError> {
        let row = content::fetch_one::<event_gallery_item::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(GalleryItemResponse::new(row, media))
    }

    pub async fn create(
        &self,
        req: CreateGalleryItemRequest,
    ) -> Result<event_gallery_item::Model, AppError> {
        let now = Utc::now();
        let row = event_gallery_item::ActiveModel {
            event_id: Set(req.event_id),
            title: Set(req.title.trim().to_string()),
            caption: Set(clean(req.caption)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(gallery_item_id = row.id, "Created gallery item");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateGalleryItemRequest,
    ) -> Result<event_gallery_item::Model, AppError> {
        let mut active = content::fetch_one::<event_gallery_item::Entity, _>(self.db, id)
            .await?
            .into_active_model();

        if let Some(event_id) = req.event_id {
            active.event_id = Set(event_id);
        }
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(caption) = clean_patch(req.caption) {
            active.caption = Set(caption);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(order) = req.order {
            active.display_order = Set(order);
        }
        active.updated_at = Set(Utc::now());
        let row = active.update(self.db).await?;

        MEDIA
            .replace(self.db, self.media, id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn set_published(&self, id: i32, is_active: bool) -> Result<(), AppError> {
        content::set_active::<event_gallery_item::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<event_gallery_item::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(gallery_item_id = id, "Deleted gallery item");
        Ok(())
    }
}
