use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use lookbook_core::{AppError, ReferenceFlags, ShootPayload};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{ShootOrchestrator, ShootOutcome, ShootSubmission};
use crate::state::AppState;

/// Multipart parts accepted by `POST /api/shoot`; documentation only.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ShootForm {
    /// JSON selection map plus `action` (`plan` | `generate`) and `confirm`
    payload: String,
    /// Optional pose reference image
    #[schema(value_type = Option<String>, format = Binary)]
    pose_ref: Option<Vec<u8>>,
    /// Optional wardrobe reference image
    #[schema(value_type = Option<String>, format = Binary)]
    wardrobe_ref: Option<Vec<u8>>,
}

const PAYLOAD_FIELD: &str = "payload";
const POSE_FIELD: &str = "poseRef";
const WARDROBE_FIELD: &str = "wardrobeRef";

/// Plan or generate a fashion shoot
///
/// Without `action: "generate"` and `confirm: true` in the payload this only
/// returns the shoot sheet. A confirmed generate calls the image provider once,
/// post-processes the result and returns it as a JPEG data URL.
///
/// # Errors
/// - `ConfigurationError` (500) - no provider credential; checked before the body is read
/// - `MalformedRequest` (400) - missing or invalid `payload` part
/// - `PayloadTooLarge` (413) - body larger than `MAX_UPLOAD_BYTES`
/// - `ProviderError` - upstream status mirrored when in 400..600, else 502
/// - `ImageProcessingError` (500) - the returned bitmap could not be processed
#[utoipa::path(
    post,
    path = "/api/shoot",
    tag = "shoot",
    request_body(content = ShootForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Shoot sheet or generated shoot", body = ShootOutcome),
        (status = 400, description = "Malformed submission", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Configuration or processing failure", body = ErrorResponse),
        (status = 502, description = "Provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %uuid::Uuid::new_v4(), operation = "create_shoot")
)]
pub async fn create_shoot(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ShootOutcome>, HttpAppError> {
    let debug = state.config.debug_provider_errors;

    let provider = state.provider.as_deref().ok_or_else(|| {
        HttpAppError::new(
            AppError::Configuration(
                "Image provider credential is not configured (set OPENAI_API_KEY)".to_string(),
            ),
            debug,
        )
    })?;

    let submission = read_submission(multipart?)
        .await
        .map_err(|e| HttpAppError::new(e, debug))?;

    let outcome = ShootOrchestrator::new(provider, &state.reference, &state.post_processor)
        .run(submission)
        .await
        .map_err(|e| HttpAppError::new(e, debug))?;

    Ok(Json(outcome))
}

/// Pull the JSON payload and reference flags out of the multipart body.
async fn read_submission(mut multipart: Multipart) -> Result<ShootSubmission, AppError> {
    let mut raw_payload: Option<String> = None;
    let mut references = ReferenceFlags::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_failure("multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            PAYLOAD_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_failure(PAYLOAD_FIELD, e))?;
                raw_payload = Some(text);
            }
            POSE_FIELD | WARDROBE_FIELD => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_failure(&name, e))?;
                let present = !data.is_empty();
                if name == POSE_FIELD {
                    references.pose_provided |= present;
                } else {
                    references.wardrobe_provided |= present;
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let raw_payload = raw_payload
        .ok_or_else(|| AppError::MalformedRequest("missing 'payload' field".to_string()))?;
    let payload: ShootPayload = serde_json::from_str(&raw_payload)?;

    tracing::debug!(
        action = ?payload.action,
        confirm = payload.confirm,
        pose = references.pose_provided,
        wardrobe = references.wardrobe_provided,
        "Submission received"
    );

    Ok(ShootSubmission {
        payload,
        references,
    })
}

/// A body cut off by the upload limit is 413; anything else is a malformed form.
fn multipart_failure(part: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the size limit while reading {}", part))
    } else {
        AppError::MalformedRequest(format!("failed to read {}: {}", part, err.body_text()))
    }
}
