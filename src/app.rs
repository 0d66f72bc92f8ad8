use axum::Router;
use crate::state::AppState;
use tower_http::trace::TraceLayer;

pub async fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
