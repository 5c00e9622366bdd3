use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::content;
use crate::entity::{event, event_highlight, event_media};
use crate::error::AppError;
use crate::media::{AssociationReconciler, MediaRegistry};
use crate::models::event::{
    CreateEventRequest, EventCategory, EventResponse, UpdateEventRequest, clean_highlights,
};
use crate::models::shared::{clean, clean_patch};

const MEDIA: AssociationReconciler<event_media::Entity> = AssociationReconciler::new();

/// Events with highlight bullets. Timing fields are computed per read.
pub struct EventService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaRegistry,
}

/// Replace an event's highlights with `texts`, in order.
async fn replace_highlights<C: ConnectionTrait>(
    db: &C,
    event_id: i32,
    texts: Vec<String>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    event_highlight::Entity::delete_many()
        .filter(event_highlight::Column::EventId.eq(event_id))
        .exec(db)
        .await?;

    let texts = clean_highlights(texts);
    if texts.is_empty() {
        return Ok(());
    }

    let rows = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| event_highlight::ActiveModel {
            event_id: Set(event_id),
            text: Set(text),
            display_order: Set(i as i32),
            created_at: Set(now),
            ..Default::default()
        });
    event_highlight::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaRegistry) -> Self {
        Self { db, media }
    }

    async fn highlights_of(&self, ids: &[i32]) -> Result<HashMap<i32, Vec<String>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = event_highlight::Entity::find()
            .filter(event_highlight::Column::EventId.is_in(ids.iter().copied()))
            .order_by_asc(event_highlight::Column::DisplayOrder)
            .order_by_asc(event_highlight::Column::Id)
            .all(self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.event_id).or_default().push(row.text);
        }
        Ok(grouped)
    }

    async fn assemble(&self, rows: Vec<event::Model>) -> Result<Vec<EventResponse>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut media = MEDIA.resolve_many(self.db, self.media, &ids).await?;
        let mut highlights = self.highlights_of(&ids).await?;
        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|r| {
                let items = media.remove(&r.id).unwrap_or_default();
                let texts = highlights.remove(&r.id).unwrap_or_default();
                EventResponse::new(r, texts, items, now)
            })
            .collect())
    }

    /// Published events in display order, optionally of one stored category.
    pub async fn public(
        &self,
        category: Option<EventCategory>,
    ) -> Result<Vec<EventResponse>, AppError> {
        let mut query = event::Entity::find().filter(event::Column::IsActive.eq(true));
        if let Some(category) = category {
            query = query.filter(event::Column::Category.eq(category.as_str()));
        }
        let rows = query
            .order_by_asc(event::Column::DisplayOrder)
            .order_by_asc(event::Column::Id)
            .all(self.db)
            .await?;
        self.assemble(rows).await
    }

    pub async fn list_all(&self) -> Result<Vec<EventResponse>, AppError> {
        let rows = content::list_ordered::<event::Entity, _>(self.db, false).await?;
        self.assemble(rows).await
    }

    pub async fn get(&self, id: i32) -> Result<EventResponse, AppError> {
        let row = content::fetch_one::<event::Entity, _>(self.db, id).await?;
        let mut assembled = self.assemble(vec![row]).await?;
        assembled
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Event {id} vanished while loading")))
    }

    pub async fn create(&self, req: CreateEventRequest) -> Result<event::Model, AppError> {
        let now = Utc::now();
        let category = req
            .category
            .unwrap_or_else(|| EventCategory::for_date(req.event_date, now));

        let txn = self.db.begin().await?;
        let row = event::ActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            location: Set(clean(req.location)),
            event_date: Set(req.event_date),
            category: Set(category.as_str().to_string()),
            registration_link: Set(clean(req.registration_link)),
            is_active: Set(req.is_active.unwrap_or(true)),
            display_order: Set(req.order.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        replace_highlights(&txn, row.id, req.highlights, now).await?;
        txn.commit().await?;

        info!(event_id = row.id, %category, "Created event");
        MEDIA
            .replace(self.db, self.media, row.id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, req: UpdateEventRequest) -> Result<event::Model, AppError> {
        let mut active = content::fetch_one::<event::Entity, _>(self.db, id)
            .await?
            .into_active_model();
        let now = Utc::now();

        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(location) = clean_patch(req.location) {
            active.location = Set(location);
        }
        if let Some(event_date) = req.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(category) = req.category {
            active.category = Set(category.as_str().to_string());
        }
        if let Some(registration_link) = clean_patch(req.registration_link) {
            active.registration_link = Set(registration_link);
        }
        if let Some(is_active) = req.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(order) = req.order {
            active.display_order = Set(order);
        }
        active.updated_at = Set(now);

        let txn = self.db.begin().await?;
        let row = active.update(&txn).await?;
        if let Some(highlights) = req.highlights {
            replace_highlights(&txn, id, highlights, now).await?;
        }
        txn.commit().await?;

        MEDIA
            .replace(self.db, self.media, id, req.media_ids.as_deref())
            .await?;
        Ok(row)
    }

    pub async fn set_published(&self, id: i32, is_active: bool) -> Result<(), AppError> {
        content::set_active::<event::Entity, _>(self.db, id, is_active).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        MEDIA.clear(&txn, id).await?;
        event_highlight::Entity::delete_many()
            .filter(event_highlight::Column::EventId.eq(id))
            .exec(&txn)
            .await?;
        content::delete_row::<event::Entity, _>(&txn, id).await?;
        txn.commit().await?;
        info!(event_id = id, "Deleted event");
        Ok(())
    }
}
