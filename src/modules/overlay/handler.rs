use super::dto::{CreateOverlayRequest, OverlayResponse, UpdateOverlayRequest, UploadResponse};
use super::service::OverlayService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::common::upload::save_logo_upload;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// List all overlays in compositing order
#[utoipa::path(
    get,
    path = "/api/v1/overlays",
    responses(
        (status = 200, description = "List of overlays", body = ApiResponse<Vec<OverlayResponse>>)
    ),
    tag = "Overlays"
)]
pub async fn list_overlays(State(state): State<AppState>) -> impl IntoResponse {
    match OverlayService::find_all(state).await {
        Ok(overlays) => ApiSuccess(
            ApiResponse::success(overlays, "Overlays retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// Create a new overlay
#[utoipa::path(
    post,
    path = "/api/v1/overlays",
    request_body = CreateOverlayRequest,
    responses(
        (status = 201, description = "Overlay created", body = ApiResponse<OverlayResponse>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Overlays"
)]
pub async fn create_overlay(
    State(state): State<AppState>,
    Json(payload): Json<CreateOverlayRequest>,
) -> impl IntoResponse {
    match OverlayService::create(state, payload).await {
        Ok(overlay) => ApiSuccess(
            ApiResponse::success(overlay, "Overlay created successfully"),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    }
}

/// Get overlay by ID
#[utoipa::path(
    get,
    path = "/api/v1/overlays/{id}",
    params(
        ("id" = Uuid, Path, description = "Overlay ID")
    ),
    responses(
        (status = 200, description = "Overlay details", body = ApiResponse<OverlayResponse>),
        (status = 404, description = "Overlay not found")
    ),
    tag = "Overlays"
)]
pub async fn get_overlay(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match OverlayService::find_by_id(state, id).await {
        Ok(overlay) => ApiSuccess(
            ApiResponse::success(overlay, "Overlay retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::NOT_FOUND).into_response(),
    }
}

/// Update overlay
#[utoipa::path(
    put,
    path = "/api/v1/overlays/{id}",
    params(
        ("id" = Uuid, Path, description = "Overlay ID")
    ),
    request_body = UpdateOverlayRequest,
    responses(
        (status = 200, description = "Overlay updated", body = ApiResponse<OverlayResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Overlay not found")
    ),
    tag = "Overlays"
)]
pub async fn update_overlay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOverlayRequest>,
) -> impl IntoResponse {
    match OverlayService::update(state, id, payload).await {
        Ok(overlay) => ApiSuccess(
            ApiResponse::success(overlay, "Overlay updated successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    }
}

/// Delete overlay
#[utoipa::path(
    delete,
    path = "/api/v1/overlays/{id}",
    params(
        ("id" = Uuid, Path, description = "Overlay ID")
    ),
    responses(
        (status = 200, description = "Overlay deleted"),
        (status = 404, description = "Overlay not found")
    ),
    tag = "Overlays"
)]
pub async fn delete_overlay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match OverlayService::delete(state, id).await {
        Ok(_) => ApiSuccess(
            ApiResponse::success((), "Overlay deleted successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::NOT_FOUND).into_response(),
    }
}

/// Upload a logo image asset
#[utoipa::path(
    post,
    path = "/api/v1/overlays/upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Logo uploaded", body = ApiResponse<UploadResponse>),
        (status = 400, description = "No file uploaded")
    ),
    tag = "Overlays"
)]
pub async fn upload_logo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("logo") {
            continue;
        }
        return match save_logo_upload(&state.config.asset_root, field).await {
            Ok(file_path) => ApiSuccess(
                ApiResponse::success(UploadResponse { file_path }, "Logo uploaded successfully"),
                StatusCode::OK,
            )
            .into_response(),
            Err(e) => ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response(),
        };
    }

    ApiError("No file uploaded.".to_string(), StatusCode::BAD_REQUEST).into_response()
}
