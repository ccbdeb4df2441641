//! Shared application state

use std::sync::Arc;

use lookbook_core::{Config, ReferenceDocument};
use lookbook_processing::ShootPostProcessor;

use crate::services::{ImageProvider, OpenAiImageProvider};

/// Read-only state shared by every request. Nothing in here changes after startup.
pub struct AppState {
    pub config: Config,
    pub reference: ReferenceDocument,
    /// `None` when no provider credential is configured
    pub provider: Option<Arc<dyn ImageProvider>>,
    pub post_processor: ShootPostProcessor,
}

impl AppState {
    /// Build state from configuration: load the reference document and, if a
    /// credential is present, the provider client.
    pub fn from_config(config: Config) -> Result<Self, anyhow::Error> {
        let reference = ReferenceDocument::load(&config.reference_doc_path);
        let provider = OpenAiImageProvider::from_config(&config)?
            .map(|provider| Arc::new(provider) as Arc<dyn ImageProvider>);

        Ok(Self {
            config,
            reference,
            provider,
            post_processor: ShootPostProcessor::new(),
        })
    }
}
