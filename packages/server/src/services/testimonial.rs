use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use tracing::info;

use super::content;
use crate::entity::{testimonial, testimonial_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::shared::{clean, clean_patch};
use crate::models::testimonial::{
    CreateTestimonialRequest, TestimonialResponse, UpdateTestimonialRequest,
};

const MEDIA: AssociationReconciler<testimonial_media::Entity> = AssociationReconciler::new();

pub struct TestimonialService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

impl<'a> TestimonialService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn with_media(
        &self,
        rows: Vec<testimonial::Model>,
    ) -> Result<Vec<TestimonialResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                TestimonialResponse::new(r, items)
            })
            .collect())
    }

    pub async fn public(&self) -> Result<Vec<TestimonialResponse>, AppError> {
        let rows = content::list_ordered::<testimonial::Entity, _>(self.db, true).await?;
        self.with_media(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<TestimonialResponse>, AppError> {
        let rows = content::list_ordered::<testimonial::Entity, _>(self.db, false).await?;
        self.with_media(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<TestimonialResponse, AppError> {
        let row = content::fetch_one::<testimonial::Entity, _>(self.db, id).await?;
        let media = MEDIA.resolve(self.db, self.media, id).await?;
        Ok(TestimonialResponse::new(row, media))
    }

    pub async fn create(
        &self,
        req: CreateTestimonialRequest,
    ) -> Result<testimonial::Model, AppError> {
        let now = Utc::now();
        let row = testimonial::ActiveModel {
            name: Set(req.name.trim().to_string()),
            role: Set(clean(req.role)),
            company: Set(clean(req.company)),
            quote: Set(req.quote.trim().to_string()),
            rating: Set(req.rating),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        info!(testimonial_id = row.id, "Created testimonial");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        req: UpdateTestimonialRequest,
    ) -> Result<testimonial::Model, AppError> {
        let mut active = content::fetch_one::<testimonial::Entity, _>(self.db, id)
            .await?
            .into_active_model();

        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(role) = clean_patch(req.role) {
            active.role = Set(role);
        }
        if let Some(company) = clean_patch(req.company) {
            active.company = Set(company);
        }
        if let Some(quote) = req.quote {
            active.quote = Set(quote.trim().to_string());
        }
        if let Some(rating) = req.rating {
            active.rating = Set(rating);
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
        content::set_active::<testimonial::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        content::delete_row::<testimonial::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(testimonial_id = id, "Deleted testimonial");
        Ok(())
    }
}
