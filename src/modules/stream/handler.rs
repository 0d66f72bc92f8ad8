use super::dto::{StartStreamRequest, StreamStatusResponse};
use super::supervisor::StreamError;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

/// Start broadcasting a source stream
#[utoipa::path(
    post,
    path = "/api/v1/stream/start",
    request_body = StartStreamRequest,
    responses(
        (status = 200, description = "Stream start initiated"),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Transcoder failed to start")
    ),
    tag = "Stream"
)]
pub async fn start_stream(
    State(state): State<AppState>,
    Json(payload): Json<StartStreamRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    match state.supervisor.start(&payload.rtsp_url).await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "Stream start initiated."),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// Stop the active broadcast
#[utoipa::path(
    post,
    path = "/api/v1/stream/stop",
    responses(
        (status = 200, description = "Stream stopped"),
        (status = 400, description = "No stream is currently running")
    ),
    tag = "Stream"
)]
pub async fn stop_stream(State(state): State<AppState>) -> impl IntoResponse {
    match state.supervisor.stop().await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "Stream stopped successfully."),
            StatusCode::OK,
        )
        .into_response(),
        Err(e @ StreamError::NothingToStop) => {
            ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// Restart the broadcast with a source stream
#[utoipa::path(
    post,
    path = "/api/v1/stream/restart",
    request_body = StartStreamRequest,
    responses(
        (status = 200, description = "Stream restart initiated"),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Transcoder failed to start")
    ),
    tag = "Stream"
)]
pub async fn restart_stream(
    State(state): State<AppState>,
    Json(payload): Json<StartStreamRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    match state.supervisor.restart(&payload.rtsp_url).await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "Stream restart initiated."),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// Report the supervisor state and active source
#[utoipa::path(
    get,
    path = "/api/v1/stream/status",
    responses(
        (status = 200, description = "Current stream status", body = ApiResponse<StreamStatusResponse>)
    ),
    tag = "Stream"
)]
pub async fn stream_status(State(state): State<AppState>) -> impl IntoResponse {
    let (stream_state, source_url) = state.supervisor.status().await;

    ApiSuccess(
        ApiResponse::success(
            StreamStatusResponse {
                state: stream_state,
                source_url,
            },
            "Stream status retrieved successfully",
        ),
        StatusCode::OK,
    )
    .into_response()
}
