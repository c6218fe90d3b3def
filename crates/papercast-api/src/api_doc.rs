//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use papercast_core::result::GenerationResult;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Papercast API",
        version = "0.1.0",
        description = "PDF-to-podcast conversion gateway. Accepts a PDF upload with style \
                       and playback speed options and returns an audio locator plus an \
                       optional transcript. Runs against a processing backend in proxy \
                       mode, or fully self-contained in mock mode for demos."
    ),
    paths(
        handlers::convert::convert,
        handlers::convert::convert_status,
        handlers::catalog::list_styles,
        handlers::catalog::list_voices,
    ),
    components(schemas(
        GenerationResult,
        handlers::catalog::StylesResponse,
        handlers::catalog::StyleInfo,
        handlers::catalog::VoicesResponse,
        handlers::catalog::VoiceInfo,
        error::ErrorResponse,
    )),
    tags(
        (name = "convert", description = "PDF-to-podcast conversion and backend status"),
        (name = "catalog", description = "Podcast style and voice preset catalogs")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
