use sea_orm::ConnectionTrait;

use super::content::{self, ContentHeadline, ContentTable};
use crate::entity::{
    about_content, event, event_gallery_item, founder, hero, mentor_talk, program, team_member,
    testimonial,
};
use crate::error::AppError;
use crate::models::dashboard::{ActivityAction, ActivityEntry};

/// Every edit is attributed to the single admin role.
const ACTOR: &str = "Admin";

async fn collect<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    limit: u64,
    out: &mut Vec<(&'static str, Vec<ContentHeadline>)>,
) -> Result<(), AppError> {
    out.push((T::CONTENT_TYPE, content::recent::<T, C>(db, limit).await?));
    Ok(())
}

/// The most recent edits across every content table, newest first.
pub async fn recent_activity<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<ActivityEntry>, AppError> {
    let mut batches = Vec::with_capacity(9);
    collect::<hero::Entity, C>(db, limit, &mut batches).await?;
    collect::<about_content::Entity, C>(db, limit, &mut batches).await?;
    collect::<program::Entity, C>(db, limit, &mut batches).await?;
    collect::<event::Entity, C>(db, limit, &mut batches).await?;
    collect::<team_member::Entity, C>(db, limit, &mut batches).await?;
    collect::<founder::Entity, C>(db, limit, &mut batches).await?;
    collect::<testimonial::Entity, C>(db, limit, &mut batches).await?;
    collect::<mentor_talk::Entity, C>(db, limit, &mut batches).await?;
    collect::<event_gallery_item::Entity, C>(db, limit, &mut batches).await?;
    Ok(merge_activity(batches, limit as usize))
}

/// Normalize per-table rows, sort by timestamp descending and truncate.
pub fn merge_activity(
    batches: Vec<(&'static str, Vec<ContentHeadline>)>,
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = batches
        .into_iter()
        .flat_map(|(content_type, rows)| {
            rows.into_iter().map(move |row| ActivityEntry {
                id: format!("{content_type}-{}", row.id),
                action: ActivityAction::infer(row.created_at, row.updated_at),
                content_type: content_type.to_string(),
                content_title: row.title,
                user: ACTOR.to_string(),
                timestamp: row.updated_at,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    entries.truncate(limit);
    entries
}
