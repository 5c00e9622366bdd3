use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{hero, hero_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::hero::{CreateHeroRequest, HeroResponse, UpdateHeroRequest};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<hero_media::Entity> = AssociationReconciler::new();

/// Hero banners. At most one is active at a time.
pub struct HeroService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> HeroService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(&self, rows: Vec<hero::Model>) -> Result<Vec<HeroResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                HeroResponse::new(r, items)
            })
            .collect())
    }

    /// The active hero, if any.
    pub async fn public(&self) -> Result<Option<HeroResponse>, AppError> {
        let Some(row) = content::find_active::<hero::Entity, _>(self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_media(vec![row]).await?.pop())
    }

    pub async fn list_all(&self) -> Result<Vec<HeroResponse>, AppError> {
        let rows = content::list_ordered::<hero::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<HeroResponse, AppError> {
        let row = content::fetch_one::<hero::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(HeroResponse::new(row, media))
    }

    pub async fn create(&self, req: CreateHeroRequest) -> Result<hero::Model, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let swept = content::deactivate_others::<hero::Entity, _>(&txn, None).await?;
        let row = hero::ActiveModel {
            title: Set(req.title.trim().to_string()),
            subtitle: Set(clean(req.subtitle)),
            description: Set(clean(req.description)),
            cta_text: Set(clean(req.cta_text)),
            cta_link: Set(clean(req.cta_link)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(hero_id = row.id, swept, "Created hero");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, req: UpdateHeroRequest) -> Result<hero::Model, AppError> {
        let existing = content::fetch_one::<hero::Entity, _>(self.db, id).await?;
        let txn = self.db.begin().await?;

        if req.is_active == Some(true) {
            content::deactivate_others::<hero::Entity, _>(&txn, Some(id)).await?;
        }

        let mut active = existing.into_active_model();
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(subtitle) = clean_patch(req.subtitle) {
            active.subtitle = Set(subtitle);
        }
        if let Some(description) = clean_patch(req.description) {
            active.description = Set(description);
        }
        if let Some(cta_text) = clean_patch(req.cta_text) {
            active.cta_text = Set(cta_text);
        }
        if let Some(cta_link) = clean_patch(req.cta_link) {
            active.cta_link = Set(cta_link);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(order) = req.order {
            active.display_order = Set(order);
        }
        active.updated_at = Set(Utc::now());
        let row = active.update(&txn).await?;
        txn.commit().await?;

        MEDIA
            .replace(self.db, self.media, id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    /// Activating a hero deactivates every other one.
    pub async fn set_published(&self, id: i32, is_active: bool) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        if is_active {
            content::deactivate_others::<hero::Entity, _>(&txn, Some(id)).await?;
        }
        content::set_active::<hero::Entity, _>(&txn, id, is_active).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<hero::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(hero_id = id, "Deleted hero");
        Ok(())
    }
}
