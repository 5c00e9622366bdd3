use chrono::{DateTime, Utc};
use sea_orm::Set;

use super::reconcile::{MediaLink, PlannedLink, StoredLink};
use crate::entity::{
    about_media, event_gallery_media, event_media, founder_media, hero_media, mentor_talk_media,
    program_media, team_member_media, testimonial_media,
};

/// Implement [`MediaLink`] for a `*_media` join entity.
///
/// `$owner` is the entity's owner foreign key field and `$Owner` the matching
/// column variant.
macro_rules! media_link {
    ($module:ident, $owner:ident, $Owner:ident, $label:literal) => {
        impl MediaLink for $module::Entity {
            const OWNER_LABEL: &'static str = $label;

            fn owner_column() -> $module::Column {
                $module::Column::$Owner
            }

            fn order_column() -> $module::Column {
                $module::Column::DisplayOrder
            }

            fn stored(model: $module::Model) -> StoredLink {
                StoredLink {
                    id: model.id,
                    owner_id: model.$owner,
                    media_id: model.media_id,
                    media_url: model.media_url,
                    media_type: model.media_type,
                    alt_text: model.alt_text,
                    display_order: model.display_order,
                }
            }

            fn build(owner_id: i32, link: PlannedLink, now: DateTime<Utc>) -> $module::ActiveModel {
                $module::ActiveModel {
                    $owner: Set(owner_id),
                    media_id: Set(Some(link.media_id)),
                    media_url: Set(Some(link.media_url)),
                    media_type: Set(link.media_type.as_str().to_string()),
                    alt_text: Set(Some(link.alt_text)),
                    display_order: Set(link.display_order),
                    created_at: Set(now),
                    ..Default::default()
                }
            }
        }
    };
}

media_link!(hero_media, hero_id, HeroId, "Hero");
media_link!(about_media, about_id, AboutId, "About");
media_link!(program_media, program_id, ProgramId, "Program");
media_link!(event_media, event_id, EventId, "Event");
media_link!(team_member_media, team_member_id, TeamMemberId, "Team member");
media_link!(founder_media, founder_id, FounderId, "Founder");
media_link!(testimonial_media, testimonial_id, TestimonialId, "Testimonial");
media_link!(mentor_talk_media, mentor_talk_id, MentorTalkId, "Mentor talk");
media_link!(event_gallery_media, gallery_item_id, GalleryItemId, "Gallery");
