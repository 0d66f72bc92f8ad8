use axum::routing::{get, post};
use axum::Router;
use crate::state::AppState;

pub mod command;
pub mod dto;
pub mod filter;
pub mod handler;
pub mod supervisor;

pub fn router() -> axum::Router<AppState> {
    Router::new()
        .route("/start", post(handler::start_stream))
        .route("/stop", post(handler::stop_stream))
        .route("/restart", post(handler::restart_stream))
        .route("/status", get(handler::stream_status))
}
