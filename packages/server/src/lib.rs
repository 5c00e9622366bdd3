pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod media;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::error::{ErrorBody, FieldError};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketing CMS API",
        version = "1.0.0",
        description = "Content management API for the marketing site and its admin dashboard"
    ),
    paths(
        handlers::auth::login,
        handlers::auth::me,
        handlers::media::list_media,
        handlers::media::get_media,
        handlers::media::register_media,
        handlers::media::upload_media,
        handlers::media::update_media,
        handlers::media::delete_media,
        handlers::hero::public_hero,
        handlers::hero::list_heroes,
        handlers::hero::get_hero,
        handlers::hero::create_hero,
        handlers::hero::update_hero,
        handlers::hero::publish_hero,
        handlers::hero::delete_hero,
        handlers::about::public_about,
        handlers::about::list_about_entries,
        handlers::about::get_about,
        handlers::about::create_about,
        handlers::about::update_about,
        handlers::about::publish_about,
        handlers::about::delete_about,
        handlers::program::public_programs,
        handlers::program::list_programs,
        handlers::program::get_program,
        handlers::program::create_program,
        handlers::program::update_program,
        handlers::program::publish_program,
        handlers::program::delete_program,
        handlers::event::public_events,
        handlers::event::list_events,
        handlers::event::get_event,
        handlers::event::create_event,
        handlers::event::update_event,
        handlers::event::publish_event,
        handlers::event::delete_event,
        handlers::team::public_team_members,
        handlers::team::list_team_members,
        handlers::team::get_team_member,
        handlers::team::create_team_member,
        handlers::team::update_team_member,
        handlers::team::publish_team_member,
        handlers::team::delete_team_member,
        handlers::founder::public_founders,
        handlers::founder::list_founders,
        handlers::founder::get_founder,
        handlers::founder::create_founder,
        handlers::founder::update_founder,
        handlers::founder::publish_founder,
        handlers::founder::delete_founder,
        handlers::testimonial::public_testimonials,
        handlers::testimonial::list_testimonials,
        handlers::testimonial::get_testimonial,
        handlers::testimonial::create_testimonial,
        handlers::testimonial::update_testimonial,
        handlers::testimonial::publish_testimonial,
        handlers::testimonial::delete_testimonial,
        handlers::mentor_talk::public_mentor_talks,
        handlers::mentor_talk::list_mentor_talks,
        handlers::mentor_talk::get_mentor_talk,
        handlers::mentor_talk::create_mentor_talk,
        handlers::mentor_talk::update_mentor_talk,
        handlers::mentor_talk::publish_mentor_talk,
        handlers::mentor_talk::delete_mentor_talk,
        handlers::gallery::public_gallery_items,
        handlers::gallery::list_gallery_items,
        handlers::gallery::get_gallery_item,
        handlers::gallery::create_gallery_item,
        handlers::gallery::update_gallery_item,
        handlers::gallery::publish_gallery_item,
        handlers::gallery::delete_gallery_item,
        handlers::dashboard::recent_activity,
        handlers::dashboard::dashboard_stats,
        handlers::health::health,
        handlers::health::health_db,
        handlers::health::health_env,
    ),
    components(schemas(
        ErrorBody, FieldError, common::StorageBackend, common::MediaKind,
        models::shared::PublishRequest,
        models::auth::LoginRequest, models::auth::LoginResponse, models::auth::MeResponse,
        models::media::MediaAssetView, models::media::MediaItem,
        models::media::RegisterMediaRequest, models::media::UpdateMediaRequest,
        models::hero::CreateHeroRequest, models::hero::UpdateHeroRequest, models::hero::HeroResponse,
        models::about::CreateAboutRequest, models::about::UpdateAboutRequest, models::about::AboutResponse,
        models::program::CreateProgramRequest, models::program::UpdateProgramRequest, models::program::ProgramResponse,
        models::event::EventCategory, models::event::CreateEventRequest, models::event::UpdateEventRequest, models::event::EventResponse,
        models::team::CreateTeamMemberRequest, models::team::UpdateTeamMemberRequest, models::team::TeamMemberResponse,
        models::founder::CreateFounderRequest, models::founder::UpdateFounderRequest, models::founder::FounderResponse,
        models::testimonial::CreateTestimonialRequest, models::testimonial::UpdateTestimonialRequest, models::testimonial::TestimonialResponse,
        models::mentor_talk::CreateMentorTalkRequest, models::mentor_talk::UpdateMentorTalkRequest, models::mentor_talk::MentorTalkResponse,
        models::gallery::CreateGalleryItemRequest, models::gallery::UpdateGalleryItemRequest, models::gallery::GalleryItemResponse,
        models::dashboard::ActivityAction, models::dashboard::ActivityEntry,
        models::dashboard::TableCount, models::dashboard::DashboardStats,
        models::health::HealthResponse, models::health::DatabaseHealth,
        models::health::EnvSetting, models::health::EnvReport,
    )),
    tags(
        (name = "Auth", description = "Admin login"),
        (name = "Media", description = "Media registry and uploads"),
        (name = "Hero", description = "Landing page hero banner (one active at a time)"),
        (name = "About", description = "About section (one active at a time)"),
        (name = "Programs", description = "Programs offered"),
        (name = "Events", description = "Upcoming and past events"),
        (name = "Team", description = "Team members"),
        (name = "Founders", description = "Founders"),
        (name = "Testimonials", description = "Testimonials"),
        (name = "Mentor Talks", description = "Recorded mentor talks"),
        (name = "Event Gallery", description = "Event photo and video gallery"),
        (name = "Dashboard", description = "Admin dashboard aggregates"),
        (name = "Health", description = "Liveness and configuration probes"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", routes::api_routes(&state.config.storage))
        .route("/health", get(handlers::health::health))
        .route("/health/db", get(handlers::health::health_db))
        .route("/health/env", get(handlers::health::health_env))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
