use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::{
    about_media, event_gallery_media, event_media, founder_media, hero_media, mentor_talk_media,
    program_media, team_member_media, testimonial_media, user,
};
use crate::media::MediaLink;
use crate::utils::password;

/// Create the configured admin account if it does not exist yet.
///
/// Does nothing unless both `auth.admin_username` and `auth.admin_password`
/// are set. An existing account keeps its password.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<bool> {
    let (Some(username), Some(pass)) = (
        auth.admin_username.as_deref().map(str::trim),
        auth.admin_password.as_deref(),
    ) else {
        return Ok(false);
    };
    if username.is_empty() || pass.is_empty() {
        return Ok(false);
    }

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let hash = password::hash_password(pass)
        .map_err(|e| anyhow::anyhow!("Password hash error: {e}"))?;

    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!(username, "Seeded admin account");
            Ok(true)
        }
        Err(DbErr::RecordNotInserted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Ensure the `(owner, display_order)` index exists on every media join table.
///
/// Schema sync only creates the columns, and every read of an entity's media
/// filters by owner and sorts by order.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    ensure_link_index::<hero_media::Entity>(db).await;
    ensure_link_index::<about_media::Entity>(db).await;
    ensure_link_index::<program_media::Entity>(db).await;
    ensure_link_index::<event_media::Entity>(db).await;
    ensure_link_index::<team_member_media::Entity>(db).await;
    ensure_link_index::<founder_media::Entity>(db).await;
    ensure_link_index::<testimonial_media::Entity>(db).await;
    ensure_link_index::<mentor_talk_media::Entity>(db).await;
    ensure_link_index::<event_gallery_media::Entity>(db).await;
    Ok(())
}

async fn ensure_link_index<L: MediaLink>(db: &DatabaseConnection) {
    let table = L::default().table_name();
    let name = format!("idx_{table}_owner_order");

    let stmt = Index::create()
        .if_not_exists()
        .name(&name)
        .table(L::default())
        .col(L::owner_column())
        .col(L::order_column())
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
