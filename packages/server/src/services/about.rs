use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{about_content, about_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::about::{AboutResponse, CreateAboutRequest, UpdateAboutRequest};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<about_media::Entity> = AssociationReconciler::new();

/// "About us" content. Same single-active rule as the hero.
pub struct AboutService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> AboutService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(
        &self,
        rows: Vec<about_content::Model>,
    ) -> Result<Vec<AboutResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                AboutResponse::new(r, items)
            })
            .collect())
    }

    pub async fn public(&self) -> Result<Option<AboutResponse>, AppError> {
        let Some(row) = content::find_active::<about_content::Entity, _>(self.db).await? else {
            return Ok(None);
        };
        Ok(self.with_media(vec![row]).await?.pop())
    }

    pub async fn list_all(&self) -> Result<Vec<AboutResponse>, AppError> {
        let rows = content::list_ordered::<about_content::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<AboutResponse, AppError> {
        let row = content::fetch_one::<about_content::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(AboutResponse::new(row, media))
    }

    pub async fn create(&self, req: CreateAboutRequest) -> Result<about_content::Model, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let swept = content::deactivate_others::<about_content::Entity, _>(&txn, None).await?;
        let row = about_content::ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            mission: Set(clean(req.mission)),
            vision: Set(clean(req.vision)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(about_id = row.id, swept, "Created about content");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateAboutRequest,
    ) -> Result<about_content::Model, AppError> {
        let existing = content::fetch_one::<about_content::Entity, _>(self.db, id).await?;
        let txn = self.db.begin().await?;

        if req.is_active == Some(true) {
            content::deactivate_others::<about_content::Entity, _>(&txn, Some(id)).await?;
        }

        let mut active = existing.into_active_model();
        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(mission) = clean_patch(req.mission) {
            active.mission = Set(mission);
        }
        if let Some(vision) = clean_patch(req.vision) {
            active.vision = Set(vision);
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

    pub async fn set_published(&self, id: i32, is_active: bool) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        if is_active {
            content::deactivate_others::<about_content::Entity, _>(&txn, Some(id)).await?;
        }
        content::set_active::<about_content::Entity, _>(&txn, id, is_active).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<about_content::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(about_id = id, "Deleted about content");
        Ok(())
    }
}
