use super::dto::{CreateOverlayRequest, OverlayResponse, UpdateOverlayRequest};
use super::repository::OverlayRepository;
use crate::state::AppState;
use anyhow::Result;
use uuid::Uuid;
use validator::Validate;

pub struct OverlayService;

impl OverlayService {
    pub async fn create(state: AppState, req: CreateOverlayRequest) -> Result<OverlayResponse> {
        req.validate()?;

        let overlay = OverlayRepository::create(
            &state.db,
            req.kind,
            &req.content,
            req.position.x,
            req.position.y,
            req.size.width,
            req.size.height,
        )
        .await?;

        Ok(overlay.into())
    }

    pub async fn find_all(state: AppState) -> Result<Vec<OverlayResponse>> {
        let overlays = OverlayRepository::find_all(&state.db).await?;
        Ok(overlays.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> Result<OverlayResponse> {
        let overlay = OverlayRepository::find_by_id(&state.db, id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Overlay not found"))?;
        Ok(overlay.into())
    }

    pub async fn update(
        state: AppState,
        id: Uuid,
        req: UpdateOverlayRequest,
    ) -> Result<OverlayResponse> {
        req.validate()?;

        let overlay = OverlayRepository::update(
            &state.db,
            id,
            req.kind,
            req.content,
            req.position.map(|p| p.x),
            req.position.map(|p| p.y),
            req.size.map(|s| s.width),
            req.size.map(|s| s.height),
        )
        .await?
        .ok_or_else(|| anyhow::anyhow!("Overlay not found"))?;

        Ok(overlay.into())
    }

    pub async fn delete(state: AppState, id: Uuid) -> Result<()> {
        let deleted = OverlayRepository::delete(&state.db, id).await?;
        if !deleted {
            anyhow::bail!("Overlay not found");
        }
        Ok(())
    }
}
