//! Request-path services: the provider client and the orchestrator that drives it.

pub mod orchestrator;
pub mod provider;

pub use orchestrator::{
    GeneratedShootResponse, ShootOrchestrator, ShootOutcome, ShootSheetResponse, ShootSubmission,
};
pub use provider::{ImageProvider, OpenAiImageProvider};
