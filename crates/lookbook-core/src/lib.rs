//! Lookbook Core Library
//!
//! Domain models, shoot-plan derivation, prompt composition, metadata
//! synthesis, configuration and the error taxonomy shared by the Lookbook
//! crates.

pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod plan;
pub mod prompt;
pub mod reference;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use metadata::{synthesize, ExifBlock, ExifSummary, ShootMetadata};
pub use models::{
    AspectRatio, AssetSource, GeneratedAsset, GenerationRequest, HairSelection, ProviderSize,
    ReferenceFlags, SelectionMap, ShootAction, ShootIntent, ShootPayload, ShootSettings,
};
pub use plan::{ResolvedSelection, ShootPlan};
pub use prompt::{compose_prompt, VisualGuidance};
pub use reference::ReferenceDocument;
