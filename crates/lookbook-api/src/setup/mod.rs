//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use lookbook_core::Config;
use std::sync::Arc;

/// Initialize telemetry, shared state and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Invalid configuration")?;
    crate::telemetry::init_telemetry(&config.environment)?;

    tracing::info!(
        environment = %config.environment,
        production = config.is_production(),
        provider_configured = config.provider_configured(),
        model = %config.openai_image_model,
        "Configuration loaded"
    );
    if !config.provider_configured() {
        tracing::warn!(
            "OPENAI_API_KEY is not set; every shoot request will fail with a configuration error"
        );
    }

    let state = Arc::new(
        AppState::from_config(config.clone()).context("Failed to build application state")?,
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
