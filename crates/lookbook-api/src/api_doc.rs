//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::services::{GeneratedShootResponse, ShootOutcome, ShootSheetResponse};
use lookbook_core::{AspectRatio, ExifBlock, ExifSummary, ShootSettings};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lookbook API",
        version = "0.1.0",
        description = "Plan fashion shoots from curated selections, then generate, finish and caption the image in a second, confirmed request."
    ),
    paths(handlers::shoot::create_shoot, handlers::health::health_check),
    components(schemas(
        ShootOutcome,
        ShootSheetResponse,
        GeneratedShootResponse,
        ShootSettings,
        AspectRatio,
        ExifSummary,
        ExifBlock,
        ErrorResponse,
        handlers::health::HealthResponse,
        handlers::shoot::ShootForm,
    )),
    tags(
        (name = "shoot", description = "Shoot planning and generation"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
