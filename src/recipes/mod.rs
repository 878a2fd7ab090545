use crate::state::AppState;
use axum::Router;

pub mod client;
pub mod dto;
pub mod handlers;
pub mod services;
pub mod upstream;

pub use client::{RecipeSource, SpoonacularClient};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::recipe_routes())
}
