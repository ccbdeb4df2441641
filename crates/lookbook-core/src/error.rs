//! Error types module
//!
//! All failures a shoot request can hit are unified under [`AppError`]. The
//! [`ErrorMetadata`] trait lets each variant describe how it is presented over
//! HTTP (status, machine code, client-facing message, log level).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed submissions
    Debug,
    /// Warning level - for upstream failures outside our control
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PROVIDER_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether the internal message must stay hidden unless debug output is on
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Provider error: {message}")]
    Provider {
        /// Upstream HTTP status, if the provider answered at all
        status: Option<u16>,
        message: String,
        /// Raw upstream payload, echoed to callers only in debug mode
        details: Option<serde_json::Value>,
    },

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Provider failure without an upstream payload.
    pub fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Provider {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Variant name used in logs and debug payloads
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "ConfigurationError",
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Provider { .. } => "ProviderError",
            AppError::ImageProcessing(_) => "ImageProcessingError",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "UnexpectedError",
        }
    }

    /// Full internal message, including the source chain when present
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }

    /// Upstream payload attached to a provider failure
    pub fn provider_details(&self) -> Option<&serde_json::Value> {
        match self {
            AppError::Provider { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedRequest(format!("payload is not valid JSON: {}", err))
    }
}

/// Upstream statuses are mirrored only when they are real HTTP error codes.
fn mirrored_status(status: Option<u16>) -> u16 {
    match status {
        Some(code) if (400..600).contains(&code) => code,
        _ => 502,
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Configuration(_) => 500,
            AppError::MalformedRequest(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Provider { status, .. } => mirrored_status(*status),
            AppError::ImageProcessing(_) => 500,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::MalformedRequest(_) => "MALFORMED_REQUEST",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Provider { .. } => "PROVIDER_ERROR",
            AppError::ImageProcessing(_) => "IMAGE_PROCESSING_ERROR",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Configuration(msg) => msg.clone(),
            AppError::MalformedRequest(msg) => format!("Invalid submission: {}", msg),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Provider { message, .. } => message.clone(),
            AppError::ImageProcessing(_) => "Failed to process the generated image".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        matches!(
            self,
            AppError::ImageProcessing(_)
                | AppError::Internal(_)
                | AppError::InternalWithSource { .. }
        )
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::MalformedRequest(_) | AppError::PayloadTooLarge(_) => LogLevel::Debug,
            AppError::Provider { .. } => LogLevel::Warn,
            AppError::Configuration(_)
            | AppError::ImageProcessing(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}
