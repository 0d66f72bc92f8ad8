use super::model::{Overlay, OverlayKind};
use crate::infrastructure::db::pool::DbPool;
use uuid::Uuid;

pub struct OverlayRepository;

impl OverlayRepository {
    /// Overlays in insertion order; the compositing order downstream
    /// depends on this being stable.
    pub async fn find_all(db: &DbPool) -> Result<Vec<Overlay>, sqlx::Error> {
        sqlx::query_as::<_, Overlay>("SELECT * FROM overlays ORDER BY created_at ASC")
            .fetch_all(db)
            .await
    }

    pub async fn find_by_id(db: &DbPool, id: Uuid) -> Result<Option<Overlay>, sqlx::Error> {
        sqlx::query_as::<_, Overlay>("SELECT * FROM overlays WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn create(
        db: &DbPool,
        kind: OverlayKind,
        content: &str,
        position_x: i32,
        position_y: i32,
        width: i32,
        height: i32,
    ) -> Result<Overlay, sqlx::Error> {
        sqlx::query_as::<_, Overlay>(
            "INSERT INTO overlays (kind, content, position_x, position_y, width, height) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(kind)
        .bind(content)
        .bind(position_x)
        .bind(position_y)
        .bind(width)
        .bind(height)
        .fetch_one(db)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        db: &DbPool,
        id: Uuid,
        kind: Option<OverlayKind>,
        content: Option<String>,
        position_x: Option<i32>,
        position_y: Option<i32>,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<Option<Overlay>, sqlx::Error> {
        sqlx::query_as::<_, Overlay>(
            "UPDATE overlays SET \
                kind = COALESCE($2, kind), \
                content = COALESCE($3, content), \
                position_x = COALESCE($4, position_x), \
                position_y = COALESCE($5, position_y), \
                width = COALESCE($6, width), \
                height = COALESCE($7, height), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(kind)
        .bind(content)
        .bind(position_x)
        .bind(position_y)
        .bind(width)
        .bind(height)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &DbPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM overlays WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
