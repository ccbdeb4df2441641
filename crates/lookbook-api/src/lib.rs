//! Lookbook API Library
//!
//! HTTP handlers, provider client, orchestration and application setup for the
//! fashion shoot service.

mod api_doc;
mod handlers;
mod services;
pub mod setup;
mod telemetry;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use services::{
    GeneratedShootResponse, ImageProvider, OpenAiImageProvider, ShootOrchestrator, ShootOutcome,
    ShootSheetResponse, ShootSubmission,
};
pub use state::AppState;
