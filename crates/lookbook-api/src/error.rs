//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every error renders as the same
//! JSON envelope and is logged once at the level its [`ErrorMetadata`] asks for.

use axum::{
    extract::multipart::MultipartRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lookbook_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Upstream payload or internal detail; only sent when debug output is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Wrapper so `AppError` (from lookbook-core) can implement `IntoResponse`.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub expose_details: bool,
}

impl HttpAppError {
    /// Wrap `error`, attaching `details` to the body when `expose_details` is set.
    pub fn new(error: AppError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        if !self.expose_details {
            return None;
        }
        match self.error.provider_details() {
            Some(raw) => Some(raw.clone()),
            None => Some(serde_json::Value::String(self.error.detailed_message())),
        }
    }
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError::new(error, false)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError::from(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError::from(AppError::MalformedRequest(format!(
            "expected a multipart form: {}",
            rejection.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let status = error.http_status_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, status, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, status, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type,
                status,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(err: HttpAppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(axum::body::to_bytes(response.into_body(), usize::MAX))
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_configuration_error_is_500() {
        let (status, body) = render(AppError::Configuration("missing key".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "CONFIGURATION_ERROR");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_provider_status_is_mirrored_with_details_in_debug() {
        let err = AppError::Provider {
            status: Some(429),
            message: "Rate limit reached".into(),
            details: Some(json!({"error": {"message": "Rate limit reached"}})),
        };
        let (status, body) = render(HttpAppError::new(err, true));
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Rate limit reached");
        assert_eq!(body["details"]["error"]["message"], "Rate limit reached");
    }

    #[test]
    fn test_provider_details_hidden_without_debug() {
        let err = AppError::Provider {
            status: Some(400),
            message: "bad prompt".into(),
            details: Some(json!({"error": {"message": "bad prompt"}})),
        };
        let (status, body) = render(HttpAppError::new(err, false));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_image_error_is_generic_unless_debug() {
        let (status, body) =
            render(AppError::ImageProcessing("jpeg decoder exploded".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "IMAGE_PROCESSING_ERROR");
        assert!(!body["error"].as_str().unwrap().contains("exploded"));
        assert!(body.get("details").is_none());

        let (_, body) = render(HttpAppError::new(
            AppError::ImageProcessing("jpeg decoder exploded".into()),
            true,
        ));
        assert!(body["details"].as_str().unwrap().contains("exploded"));
    }

    #[test]
    fn test_anyhow_becomes_internal() {
        let (status, body) = render(anyhow::anyhow!("boom").into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
