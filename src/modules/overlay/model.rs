use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "overlay_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Text,
    Logo,
}

/// A single visual element composited onto the broadcast:
/// a text caption (`content` is the literal string) or a logo
/// (`content` is a path relative to the asset root).
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema, Clone)]
pub struct Overlay {
    pub id: Uuid,
    pub kind: OverlayKind,
    pub content: String,
    pub position_x: i32,
    pub position_y: i32,
    pub width: i32,
    // For text overlays the height doubles as the font size.
    pub height: i32,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::iso8601")]
    pub updated_at: OffsetDateTime,
}
