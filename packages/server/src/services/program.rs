use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{program, program_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::program::{CreateProgramRequest, ProgramResponse, UpdateProgramRequest};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<program_media::Entity> = AssociationReconciler::new();

pub struct ProgramService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> ProgramService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(&self, rows: Vec<program::Model>) -> Result<Vec<ProgramResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                ProgramResponse::new(r, items)
            })
            .collect())
    }

    /// Published programs in display order.
    pub async fn public(&self) -> Result<Vec<ProgramResponse>, AppError> {
        let rows = content::list_ordered::<program::Entity, _>(self.db, true).await?;
        self.with_media(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<ProgramResponse>, AppError> {
        let rows = content::list_ordered::<program::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<ProgramResponse, AppError> {
        let row = content::fetch_one::<program::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(ProgramResponse::new(row, media))
    }

    pub async fn create(&self, req: CreateProgramRequest) -> Result<program::Model, AppError> {
        let now = Utc::now();
        let row = program::ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            category: Set(clean(req.category)),
            duration: Set(clean(req.duration)),
            link: Set(clean(req.link)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(program_id = row.id, "Created program");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateProgramRequest,
    ) -> Result<program::Model, AppError> {
        let mut active = content::fetch_one::<program::Entity, _>(self.db, id)
            .await?
            .into_active_model();

        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(category) = clean_patch(req.category) {
            active.category = Set(category);
        }
        if let Some(duration) = clean_patch(req.duration) {
            active.duration = Set(duration);
        }
        if let Some(link) = clean_patch(req.link) {
            active.link = Set(link);
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
        content::set_active::<program::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<program::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(program_id = id, "Deleted program");
        Ok(())
    }
}
