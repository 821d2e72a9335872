use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod kinds;
pub mod repo;
pub mod repo_types;
mod services;

pub use kinds::{Tutors, Users};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::account_routes::<Users>())
        .merge(handlers::account_routes::<Tutors>())
}
