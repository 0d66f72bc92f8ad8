use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::docs::ApiDoc;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes())
        .nest("/api/v1/overlays", crate::modules::overlay::router())
        .nest("/api/v1/stream", crate::modules::stream::router())
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new().route("/health", axum::routing::get(health))
}

async fn health() -> impl IntoResponse {
    ApiSuccess(
        ApiResponse::success((), "API Server is running"),
        StatusCode::OK,
    )
}

#[cfg(test)]
mod tests {
    use super::health;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn health_speaks_the_response_envelope() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "API Server is running");
    }
}
