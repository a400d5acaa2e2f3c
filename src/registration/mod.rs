use crate::db::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
mod services;

pub fn router() -> Router<AppState> {
    handlers::registration_routes()
}
