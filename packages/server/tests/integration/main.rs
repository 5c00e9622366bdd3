mod common;

mod auth;
mod content;
mod dashboard;
mod event;
mod health;
mod hero;
mod media;
