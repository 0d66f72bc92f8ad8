use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::overlay::handler::list_overlays,
        crate::modules::overlay::handler::create_overlay,
        crate::modules::overlay::handler::get_overlay,
        crate::modules::overlay::handler::update_overlay,
        crate::modules::overlay::handler::delete_overlay,
        crate::modules::overlay::handler::upload_logo,
        crate::modules::stream::handler::start_stream,
        crate::modules::stream::handler::stop_stream,
        crate::modules::stream::handler::restart_stream,
        crate::modules::stream::handler::stream_status,
    ),
    components(
        schemas(
            crate::modules::overlay::dto::CreateOverlayRequest,
            crate::modules::overlay::dto::UpdateOverlayRequest,
            crate::modules::overlay::dto::OverlayResponse,
            crate::modules::overlay::dto::PositionDto,
            crate::modules::overlay::dto::SizeDto,
            crate::modules::overlay::dto::UploadResponse,
            crate::modules::overlay::model::OverlayKind,
            crate::modules::stream::dto::StartStreamRequest,
            crate::modules::stream::dto::StreamStatusResponse,
            crate::modules::stream::supervisor::StreamState,
        )
    ),
    tags(
        (name = "Overlays", description = "Overlay management and logo uploads"),
        (name = "Stream", description = "Broadcast lifecycle control")
    )
)]
pub struct ApiDoc;
