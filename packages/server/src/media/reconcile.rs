use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use common::MediaKind;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument, warn};

use super::registry::MediaRegistry;
use crate::entity::media_asset;
use crate::error::AppError;
use crate::models::media::MediaItem;

/// An association row as read back from any per-type join table.
#[derive(Debug, Clone)]
pub struct StoredLink {
    pub id: i32,
    pub owner_id: i32,
    pub media_id: Option<i32>,
    pub media_url: Option<String>,
    pub media_type: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
}

/// An association row about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLink {
    pub media_id: i32,
    pub media_url: String,
    pub media_type: MediaKind,
    pub alt_text: String,
    pub display_order: i32,
}

/// A join table linking one content type to registry assets.
///
/// Implemented for every `*_media` entity by the `media_link!` macro.
pub trait MediaLink: EntityTrait {
    /// Human label used for placeholder alt text, e.g. `"Hero"`.
    const OWNER_LABEL: &'static str;

    fn owner_column() -> Self::Column;
    fn order_column() -> Self::Column;
    fn stored(model: Self::Model) -> StoredLink;
    fn build(owner_id: i32, link: PlannedLink, now: DateTime<Utc>) -> Self::ActiveModel;
}

/// What a [`AssociationReconciler::replace`] call did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub removed: u64,
    pub inserted: usize,
    pub skipped: usize,
    /// The new rows could not be written. The old rows are already gone.
    pub insert_failed: bool,
}

/// Turn requested asset ids into rows to insert.
///
/// Ids that are unknown, or whose asset has no public URL, are returned in the
/// second vector and otherwise ignored. Survivors keep request order and are
/// numbered `0..n` without gaps.
pub fn plan_links(
    label: &str,
    requested: &[i32],
    assets: &HashMap<i32, media_asset::Model>,
    registry: &MediaRegistry,
) -> Result<(Vec<PlannedLink>, Vec<i32>), AppError> {
    let mut planned = Vec::with_capacity(requested.len());
    let mut skipped = Vec::new();

    for &media_id in requested {
        let Some(asset) = assets.get(&media_id) else {
            skipped.push(media_id);
            continue;
        };
        let Some(url) = registry.resolve_url(asset)? else {
            skipped.push(media_id);
            continue;
        };
        let display_order = planned.len() as i32;
        planned.push(PlannedLink {
            media_id,
            media_url: url,
            media_type: MediaKind::from_mime(&asset.mime_type),
            alt_text: format!("{label} media {}", display_order + 1),
            display_order,
        });
    }

    Ok((planned, skipped))
}

/// Resolve stored rows into display items, sorted by order.
///
/// Registry-backed rows take the live URL of their asset; rows whose asset
/// vanished or lost its public path are dropped. Legacy rows without an asset
/// id survive only when their URL points into the public bucket.
pub fn resolve_links(
    mut links: Vec<StoredLink>,
    assets: &HashMap<i32, media_asset::Model>,
    registry: &MediaRegistry,
) -> Result<Vec<MediaItem>, AppError> {
    links.sort_by_key(|l| (l.display_order, l.id));
    let mut items = Vec::with_capacity(links.len());

    for link in links {
        let resolved = match link.media_id {
            Some(media_id) => {
                let Some(asset) = assets.get(&media_id) else {
                    debug!(link_id = link.id, media_id, "Dropping link to missing asset");
                    continue;
                };
                registry
                    .resolve_url(asset)?
                    .map(|url| (url, MediaKind::from_mime(&asset.mime_type)))
            }
            None => link
                .media_url
                .as_deref()
                .filter(|url| registry.is_trusted_url(url))
                .map(|url| {
                    let kind = link.media_type.parse().unwrap_or(MediaKind::Image);
                    (url.to_string(), kind)
                }),
        };

        let Some((url, media_type)) = resolved else {
            debug!(link_id = link.id, "Dropping unresolvable link");
            continue;
        };

        items.push(MediaItem {
            id: link.id,
            media_id: link.media_id,
            url,
            media_type,
            alt_text: link.alt_text,
            order: link.display_order,
        });
    }

    Ok(items)
}

fn asset_ids(links: &[StoredLink]) -> Vec<i32> {
    let mut ids: Vec<i32> = links.iter().filter_map(|l| l.media_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Full-replace reconciliation of one content type's media associations.
pub struct AssociationReconciler<L>(PhantomData<fn() -> L>);

impl<L: MediaLink> AssociationReconciler<L> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Replace the owner's associations with `requested`.
    ///
    /// `None` leaves existing rows untouched. `Some(&[])` clears them.
    /// Existing rows are deleted before the new set is written; a failing
    /// insert is logged and reported in the outcome, not raised.
    #[instrument(skip(self, db, registry, requested), fields(owner = L::OWNER_LABEL))]
    pub async fn replace<C: ConnectionTrait>(
        &self,
        db: &C,
        registry: &MediaRegistry,
        owner_id: i32,
        requested: Option<&[i32]>,
    ) -> Result<ReconcileOutcome, AppError> {
        let Some(requested) = requested else {
            return Ok(ReconcileOutcome::default());
        };

        let removed = self.clear(db, owner_id).await?;

        let assets = registry.find_many(db, requested).await?;
        let (planned, skipped) = plan_links(L::OWNER_LABEL, requested, &assets, registry)?;
        if !skipped.is_empty() {
            warn!(owner_id, ?skipped, "Skipping media that cannot be resolved");
        }

        let mut outcome = ReconcileOutcome {
            removed,
            inserted: 0,
            skipped: skipped.len(),
            insert_failed: false,
        };
        if planned.is_empty() {
            return Ok(outcome);
        }

        let now = Utc::now();
        let count = planned.len();
        let rows = planned.into_iter().map(|p| L::build(owner_id, p, now));
        match L::insert_many(rows).exec(db).await {
            Ok(_) => outcome.inserted = count,
            Err(e) => {
                warn!(owner_id, error = %e, "Failed to write media associations");
                outcome.insert_failed = true;
            }
        }

        Ok(outcome)
    }

    /// Delete every association of the owner.
    pub async fn clear<C: ConnectionTrait>(&self, db: &C, owner_id: i32) -> Result<u64, AppError> {
        let result = L::delete_many()
            .filter(L::owner_column().eq(owner_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Media of a single owner.
    pub async fn resolve<C: ConnectionTrait>(
        &self,
        db: &C,
        registry: &MediaRegistry,
        owner_id: i32,
    ) -> Result<Vec<MediaItem>, AppError> {
        Ok(self
            .resolve_many(db, registry, &[owner_id])
            .await?
            .remove(&owner_id)
            .unwrap_or_default())
    }

    /// Media of many owners with one query per table. Owners without media
    /// are absent from the map.
    pub async fn resolve_many<C: ConnectionTrait>(
        &self,
        db: &C,
        registry: &MediaRegistry,
        owner_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<MediaItem>>, AppError> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links: Vec<StoredLink> = L::find()
            .filter(L::owner_column().is_in(owner_ids.iter().copied()))
            .order_by_asc(L::order_column())
            .all(db)
            .await?
            .into_iter()
            .map(L::stored)
            .collect();

        let assets = registry.find_many(db, &asset_ids(&links)).await?;

        let mut grouped: BTreeMap<i32, Vec<StoredLink>> = BTreeMap::new();
        for link in links {
            grouped.entry(link.owner_id).or_default().push(link);
        }

        grouped
            .into_iter()
            .map(|(owner, links)| Ok((owner, resolve_links(links, &assets, registry)?)))
            .collect()
    }
}

impl<L: MediaLink> Default for AssociationReconciler<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use common::StorageBackend;

    use super::*;
    use crate::media::registry::tests::{BASE, asset, registry};

    fn assets(list: Vec<media_asset::Model>) -> HashMap<i32, media_asset::Model> {
        list.into_iter().map(|a| (a.id, a)).collect()
    }

    fn stored(id: i32, media_id: Option<i32>, url: Option<&str>, order: i32) -> StoredLink {
        StoredLink {
            id,
            owner_id: 1,
            media_id,
            media_url: url.map(str::to_string),
            media_type: "image".into(),
            alt_text: None,
            display_order: order,
        }
    }

    #[test]
    fn unresolvable_ids_are_skipped_and_order_is_compacted() {
        let known = assets(vec![
            asset(1, StorageBackend::ObjectStorage, Some("uploads/1.png")),
            asset(2, StorageBackend::ObjectStorage, None),
            asset(3, StorageBackend::ExternalArchive, Some("x.png")),
            asset(4, StorageBackend::ObjectStorage, Some("uploads/4.png")),
        ]);

        let (planned, skipped) = plan_links("Hero", &[4, 2, 99, 3, 1], &known, &registry()).unwrap();

        assert_eq!(skipped, vec![2, 99, 3]);
        let ids: Vec<_> = planned.iter().map(|p| p.media_id).collect();
        assert_eq!(ids, vec![4, 1]);
        let orders: Vec<_> = planned.iter().map(|p| p.display_order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(planned[0].alt_text, "Hero media 1");
        assert_eq!(planned[1].alt_text, "Hero media 2");
        assert_eq!(
            planned[1].media_url,
            format!("{BASE}/storage/v1/object/public/media/uploads/1.png")
        );
    }

    #[test]
    fn media_type_follows_mime() {
        let mut clip = asset(5, StorageBackend::ObjectStorage, Some("uploads/5.mp4"));
        clip.mime_type = "video/mp4".into();
        let (planned, _) = plan_links("Event", &[5], &assets(vec![clip]), &registry()).unwrap();
        assert_eq!(planned[0].media_type, MediaKind::Video);
    }

    #[test]
    fn planning_is_deterministic() {
        let known = assets(vec![
            asset(1, StorageBackend::ObjectStorage, Some("a.png")),
            asset(2, StorageBackend::ObjectStorage, Some("b.png")),
        ]);
        let registry = registry();
        let first = plan_links("Team member", &[2, 1], &known, &registry).unwrap();
        let second = plan_links("Team member", &[2, 1], &known, &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn planning_without_base_url_fails() {
        let known = assets(vec![asset(1, StorageBackend::ObjectStorage, Some("a.png"))]);
        let registry = MediaRegistry::from_parts(None, "media".into(), None);
        assert!(matches!(
            plan_links("Hero", &[1], &known, &registry),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn resolution_drops_orphans_and_uses_live_urls() {
        let mut moved = asset(1, StorageBackend::ObjectStorage, Some("uploads/new.png"));
        moved.mime_type = "image/webp".into();
        let known = assets(vec![moved]);

        let links = vec![
            stored(11, Some(1), Some(&format!("{BASE}/storage/v1/object/public/media/uploads/old.png")), 1),
            stored(12, Some(7), None, 0),
        ];
        let items = resolve_links(links, &known, &registry()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 11);
        assert!(items[0].url.ends_with("/uploads/new.png"));
    }

    #[test]
    fn legacy_urls_need_the_trusted_prefix() {
        let links = vec![
            stored(1, None, Some(&format!("{BASE}/storage/v1/object/public/media/legacy.jpg")), 2),
            stored(2, None, Some("https://cdn.example.com/legacy.jpg"), 0),
            stored(3, None, None, 1),
        ];
        let items = resolve_links(links, &HashMap::new(), &registry()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].media_id, None);
        assert_eq!(items[0].media_type, MediaKind::Image);
    }

    #[test]
    fn resolution_sorts_by_order_then_id() {
        let known = assets(vec![
            asset(1, StorageBackend::ObjectStorage, Some("a.png")),
            asset(2, StorageBackend::ObjectStorage, Some("b.png")),
        ]);
        let links = vec![stored(9, Some(2), None, 1), stored(8, Some(1), None, 1), stored(7, Some(2), None, 0)];
        let items = resolve_links(links, &known, &registry()).unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn asset_ids_are_deduplicated() {
        let links = vec![stored(1, Some(3), None, 0), stored(2, Some(3), None, 1), stored(3, None, None, 2)];
        assert_eq!(asset_ids(&links), vec![3]);
    }
}
