use axum::routing::{get, post};
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> axum::Router<AppState> {
    Router::new()
        .route("/", get(handler::list_overlays).post(handler::create_overlay))
        .route(
            "/{id}",
            get(handler::get_overlay)
                .put(handler::update_overlay)
                .delete(handler::delete_overlay),
        )
        .route("/upload", post(handler::upload_logo))
}
