pub mod about;
pub mod auth;
pub mod dashboard;
pub mod event;
pub mod founder;
pub mod gallery;
pub mod health;
pub mod hero;
pub mod media;
pub mod mentor_talk;
pub mod program;
pub mod shared;
pub mod team;
pub mod testimonial;
