use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::supervisor::StreamState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartStreamRequest {
    #[validate(length(min = 1, message = "rtsp_url is required"))]
    pub rtsp_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamStatusResponse {
    pub state: StreamState,
    pub source_url: Option<String>,
}
