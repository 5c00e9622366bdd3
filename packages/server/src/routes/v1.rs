use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::config::StorageConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/media", media_routes(storage))
        .nest("/hero", hero_routes())
        .nest("/about", about_routes())
        .nest("/programs", program_routes())
        .nest("/events", event_routes())
        .nest("/team", team_routes())
        .nest("/founders", founder_routes())
        .nest("/testimonials", testimonial_routes())
        .nest("/mentor-talks", mentor_talk_routes())
        .nest("/event-gallery", gallery_routes())
        .nest("/dashboard", dashboard_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn media_routes(storage: &StorageConfig) -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::media::list_media).post(handlers::media::register_media),
        )
        .route(
            "/{id}",
            get(handlers::media::get_media)
                .patch(handlers::media::update_media)
                .delete(handlers::media::delete_media),
        );

    let upload = Router::new()
        .route("/upload", post(handlers::media::upload_media))
        .layer(handlers::media::media_upload_body_limit(
            storage.max_upload_size,
        ));

    crud.merge(upload)
}

fn hero_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::hero::public_hero))
        .route(
            "/",
            get(handlers::hero::list_heroes).post(handlers::hero::create_hero),
        )
        .route(
            "/{id}",
            get(handlers::hero::get_hero)
                .put(handlers::hero::update_hero)
                .delete(handlers::hero::delete_hero),
        )
        .route("/{id}/publish", patch(handlers::hero::publish_hero))
}

fn about_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::about::public_about))
        .route(
            "/",
            get(handlers::about::list_about_entries).post(handlers::about::create_about),
        )
        .route(
            "/{id}",
            get(handlers::about::get_about)
                .put(handlers::about::update_about)
                .delete(handlers::about::delete_about),
        )
        .route("/{id}/publish", patch(handlers::about::publish_about))
}

fn program_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::program::public_programs))
        .route(
            "/",
            get(handlers::program::list_programs).post(handlers::program::create_program),
        )
        .route(
            "/{id}",
            get(handlers::program::get_program)
                .put(handlers::program::update_program)
                .delete(handlers::program::delete_program),
        )
        .route("/{id}/publish", patch(handlers::program::publish_program))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::event::public_events))
        .route(
            "/",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route(
            "/{id}",
            get(handlers::event::get_event)
                .put(handlers::event::update_event)
                .delete(handlers::event::delete_event),
        )
        .route("/{id}/publish", patch(handlers::event::publish_event))
}

fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::team::public_team_members))
        .route(
            "/",
            get(handlers::team::list_team_members).post(handlers::team::create_team_member),
        )
        .route(
            "/{id}",
            get(handlers::team::get_team_member)
                .put(handlers::team::update_team_member)
                .delete(handlers::team::delete_team_member),
        )
        .route("/{id}/publish", patch(handlers::team::publish_team_member))
}

fn founder_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::founder::public_founders))
        .route(
            "/",
            get(handlers::founder::list_founders).post(handlers::founder::create_founder),
        )
        .route(
            "/{id}",
            get(handlers::founder::get_founder)
                .put(handlers::founder::update_founder)
                .delete(handlers::founder::delete_founder),
        )
        .route("/{id}/publish", patch(handlers::founder::publish_founder))
}

fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::testimonial::public_testimonials))
        .route(
            "/",
            get(handlers::testimonial::list_testimonials).post(handlers::testimonial::create_testimonial),
        )
        .route(
            "/{id}",
            get(handlers::testimonial::get_testimonial)
                .put(handlers::testimonial::update_testimonial)
                .delete(handlers::testimonial::delete_testimonial),
        )
        .route("/{id}/publish", patch(handlers::testimonial::publish_testimonial))
}

fn mentor_talk_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::mentor_talk::public_mentor_talks))
        .route(
            "/",
            get(handlers::mentor_talk::list_mentor_talks).post(handlers::mentor_talk::create_mentor_talk),
        )
        .route(
            "/{id}",
            get(handlers::mentor_talk::get_mentor_talk)
                .put(handlers::mentor_talk::update_mentor_talk)
                .delete(handlers::mentor_talk::delete_mentor_talk),
        )
        .route("/{id}/publish", patch(handlers::mentor_talk::publish_mentor_talk))
}

fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/public", get(handlers::gallery::public_gallery_items))
        .route(
            "/",
            get(handlers::gallery::list_gallery_items).post(handlers::gallery::create_gallery_item),
        )
        .route(
            "/{id}",
            get(handlers::gallery::get_gallery_item)
                .put(handlers::gallery::update_gallery_item)
                .delete(handlers::gallery::delete_gallery_item),
        )
        .route("/{id}/publish", patch(handlers::gallery::publish_gallery_item))
}

fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", get(handlers::dashboard::recent_activity))
        .route("/stats", get(handlers::dashboard::dashboard_stats))
}
