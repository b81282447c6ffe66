//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use skinvault_core::models;

pub fn get_openapi_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Skinvault API",
        version = "0.1.0",
        description = "Upload service for PNG player skin textures. Files are deduplicated by SHA-256 content hash and stored under /api/v0/."
    ),
    paths(
        handlers::texture_upload::upload_textures,
        handlers::health::health_check,
    ),
    components(schemas(
        models::BatchSummary,
        models::ProcessingResult,
        models::Variant,
        handlers::health::HealthCheckResponse,
    )),
    tags(
        (name = "textures", description = "Texture upload"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
