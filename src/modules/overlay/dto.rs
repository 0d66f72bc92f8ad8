use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::model::{Overlay, OverlayKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct PositionDto {
    #[validate(range(min = 0, message = "x must be non-negative"))]
    pub x: i32,
    #[validate(range(min = 0, message = "y must be non-negative"))]
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct SizeDto {
    #[validate(range(min = 0, message = "width must be non-negative"))]
    pub width: i32,
    #[validate(range(min = 0, message = "height must be non-negative"))]
    pub height: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOverlayRequest {
    pub kind: OverlayKind,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(nested)]
    pub position: PositionDto,
    #[validate(nested)]
    pub size: SizeDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOverlayRequest {
    pub kind: Option<OverlayKind>,
    pub content: Option<String>,
    #[validate(nested)]
    pub position: Option<PositionDto>,
    #[validate(nested)]
    pub size: Option<SizeDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverlayResponse {
    pub id: Uuid,
    pub kind: OverlayKind,
    pub content: String,
    pub position: PositionDto,
    pub size: SizeDto,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}

impl From<Overlay> for OverlayResponse {
    fn from(o: Overlay) -> Self {
        Self {
            id: o.id,
            kind: o.kind,
            content: o.content,
            position: PositionDto {
                x: o.position_x,
                y: o.position_y,
            },
            size: SizeDto {
                width: o.width,
                height: o.height,
            },
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub file_path: String,
}
