pub mod about_content;
pub mod about_media;
pub mod event;
pub mod event_gallery_item;
pub mod event_gallery_media;
pub mod event_highlight;
pub mod event_media;
pub mod founder;
pub mod founder_media;
pub mod hero;
pub mod hero_media;
pub mod media_asset;
pub mod mentor_talk;
pub mod mentor_talk_media;
pub mod program;
pub mod program_media;
pub mod team_member;
pub mod team_member_media;
pub mod testimonial;
pub mod testimonial_media;
pub mod user;
