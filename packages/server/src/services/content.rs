use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entity::{
    about_content, event, event_gallery_item, founder, hero, mentor_talk, program, team_member,
    testimonial,
};
use crate::error::AppError;
use crate::models::dashboard::TableCount;

/// The fields every content row shares, as needed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHeadline {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A content table with the common `id` / `is_active` / `display_order` columns.
pub trait ContentTable: EntityTrait {
    /// Stable name used in activity entries and log fields.
    const CONTENT_TYPE: &'static str;
    /// Singular, capitalized name used in error messages.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn active_column() -> Self::Column;
    fn order_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn headline(model: &Self::Model) -> ContentHeadline;
}

macro_rules! content_table {
    ($module:ident, $content_type:literal, $label:literal, $title:ident) => {
        impl ContentTable for $module::Entity {
            const CONTENT_TYPE: &'static str = $content_type;
            const LABEL: &'static str = $label;

            fn id_column() -> $module::Column {
                $module::Column::Id
            }

            fn active_column() -> $module::Column {
                $module::Column::IsActive
            }

            fn order_column() -> $module::Column {
                $module::Column::DisplayOrder
            }

            fn updated_at_column() -> $module::Column {
                $module::Column::UpdatedAt
            }

            fn headline(model: &$module::Model) -> ContentHeadline {
                ContentHeadline {
                    id: model.id,
                    title: model.$title.clone(),
                    created_at: model.created_at,
                    updated_at: model.updated_at,
                }
            }
        }
    };
}

content_table!(hero, "hero", "Hero", title);
content_table!(about_content, "about", "About content", title);
content_table!(program, "program", "Program", title);
content_table!(event, "event", "Event", title);
content_table!(team_member, "team", "Team member", name);
content_table!(founder, "founder", "Founder", name);
content_table!(testimonial, "testimonial", "Testimonial", name);
content_table!(mentor_talk, "mentor_talk", "Mentor talk", title);
content_table!(event_gallery_item, "event_gallery", "Gallery item", title);

fn not_found<T: ContentTable>(id: i32) -> AppError {
    AppError::NotFound(format!("{} {id} not found", T::LABEL))
}

pub async fn fetch_one<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<T::Model, AppError> {
    T::find()
        .filter(T::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| not_found::<T>(id))
}

/// Rows sorted by `display_order`, ties in insertion order.
pub async fn list_ordered<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    only_active: bool,
) -> Result<Vec<T::Model>, AppError> {
    let mut query = T::find();
    if only_active {
        query = query.filter(T::active_column().eq(true));
    }
    Ok(query
        .order_by_asc(T::order_column())
        .order_by_asc(T::id_column())
        .all(db)
        .await?)
}

/// The most recently touched active row, for single-active tables.
pub async fn find_active<T: ContentTable, C: ConnectionTrait>(
    db: &C,
) -> Result<Option<T::Model>, AppError> {
    Ok(T::find()
        .filter(T::active_column().eq(true))
        .order_by_desc(T::updated_at_column())
        .order_by_desc(T::id_column())
        .one(db)
        .await?)
}

/// Mark every active row inactive, except `keep`.
pub async fn deactivate_others<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    keep: Option<i32>,
) -> Result<u64, AppError> {
    let mut update = T::update_many()
        .col_expr(T::active_column(), Expr::value(false))
        .filter(T::active_column().eq(true));
    if let Some(keep) = keep {
        update = update.filter(T::id_column().ne(keep));
    }
    Ok(update.exec(db).await?.rows_affected)
}

/// Flip the active flag of one row.
pub async fn set_active<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    id: i32,
    active: bool,
) -> Result<(), AppError> {
    let result = T::update_many()
        .col_expr(T::active_column(), Expr::value(active))
        .col_expr(T::updated_at_column(), Expr::value(Utc::now()))
        .filter(T::id_column().eq(id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(not_found::<T>(id));
    }
    Ok(())
}

pub async fn delete_row<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<(), AppError> {
    let result = T::delete_many()
        .filter(T::id_column().eq(id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(not_found::<T>(id));
    }
    Ok(())
}

pub async fn count_table<T: ContentTable, C: ConnectionTrait>(
    db: &C,
) -> Result<TableCount, AppError>
where
    T::Model: Sync,
{
    let total = T::find().count(db).await?;
    let published = T::find()
        .filter(T::active_column().eq(true))
        .count(db)
        .await?;
    Ok(TableCount { total, published })
}

/// The `limit` most recently updated rows.
pub async fn recent<T: ContentTable, C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<ContentHeadline>, AppError> {
    Ok(T::find()
        .order_by_desc(T::updated_at_column())
        .limit(limit)
        .all(db)
        .await?
        .iter()
        .map(T::headline)
        .collect())
}
