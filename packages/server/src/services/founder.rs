use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{founder, founder_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::founder::{CreateFounderRequest, FounderResponse, UpdateFounderRequest};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<founder_media::Entity> = AssociationReconciler::new();

pub struct FounderService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> FounderService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(&self, rows: Vec<founder::Model>) -> Result<Vec<FounderResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                FounderResponse::new(r, items)
            })
            .collect())
    }

    pub async fn public(&self) -> Result<Vec<FounderResponse>, AppError> {
        let rows = content::list_ordered::<founder::Entity, _>(self.db, true).await?;
        self.with_media(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<FounderResponse>, AppError> {
        let rows = content::list_ordered::<founder::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<FounderResponse, AppError> {
        let row = content::fetch_one::<founder::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(FounderResponse::new(row, media))
    }

    pub async fn create(&self, req: CreateFounderRequest) -> Result<founder::Model, AppError> {
        let now = Utc::now();
        let row = founder::ActiveModel {
            name: Set(req.name.trim().to_string()),
            title: Set(req.title.trim().to_string()),
            bio: Set(clean(req.bio)),
            quote: Set(clean(req.quote)),
            linkedin_url: Set(clean(req.linkedin_url)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(founder_id = row.id, "Created founder");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateFounderRequest,
    ) -> Result<founder::Model, AppError> {
        let mut active = content::fetch_one::<founder::Entity, _>(self.db, id)
            .await?
            .into_active_model();

        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(bio) = clean_patch(req.bio) {
            active.bio = Set(bio);
        }
        if let Some(quote) = clean_patch(req.quote) {
            active.quote = Set(quote);
        }
        if let Some(linkedin_url) = clean_patch(req.linkedin_url) {
            active.linkedin_url = Set(linkedin_url);
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
        content::set_active::<founder::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<founder::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(founder_id = id, "Deleted founder");
        Ok(())
    }
}
