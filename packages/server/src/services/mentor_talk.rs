use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{mentor_talk, mentor_talk_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::mentor_talk::{
    CreateMentorTalkRequest, MentorTalkResponse, UpdateMentorTalkRequest,
};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<mentor_talk_media::Entity> = AssociationReconciler::new();

pub struct MentorTalkService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> MentorTalkService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(
        &self,
        rows: Vec<mentor_talk::Model>,
    ) -> Result<Vec<MentorTalkResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                MentorTalkResponse::new(r, items)
            })
            .collect())
    }

    pub async fn public(&self) -> Result<Vec<MentorTalkResponse>, AppError> {
        let rows = content::list_ordered::<mentor_talk::Entity, _>(self.db, true).await?;
        self.with_media(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<MentorTalkResponse>, AppError> {
        let rows = content::list_ordered::<mentor_talk::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<MentorTalkResponse, AppError> {
        let row = content::fetch_one::<mentor_talk::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(MentorTalkResponse::new(row, media))
    }

    pub async fn create(&self, req: CreateMentorTalkRequest) -> Result<mentor_talk::Model, AppError> {
        let now = Utc::now();
        let row = mentor_talk::ActiveModel {
            title: Set(req.title.trim().to_string()),
            speaker: Set(req.speaker.trim().to_string()),
            speaker_role: Set(clean(req.speaker_role)),
            description: Set(clean(req.description)),
            talk_date: Set(req.talk_date),
            video_url: Set(clean(req.video_url)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(mentor_talk_id = row.id, "Created mentor talk");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateMentorTalkRequest,
    ) -> Result<mentor_talk::Model, AppError> {
        let mut active = content::fetch_one::<mentor_talk::Entity, _>(self.db, id)
            .await?
            .into_active_model();

        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(speaker) = req.speaker {
            active.speaker = Set(speaker.trim().to_string());
        }
        if let Some(speaker_role) = clean_patch(req.speaker_role) {
            active.speaker_role = Set(speaker_role);
        }
        if let Some(description) = clean_patch(req.description) {
            active.description = Set(description);
        }
        if let Some(talk_date) = req.talk_date {
            active.talk_date = Set(talk_date);
        }
        if let Some(video_url) = clean_patch(req.video_url) {
            active.video_url = Set(video_url);
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
        content::set_active::<mentor_talk::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<mentor_talk::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(mentor_talk_id = id, "Deleted mentor talk");
        Ok(())
    }
}
