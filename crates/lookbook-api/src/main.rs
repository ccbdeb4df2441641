use lookbook_core::Config;

// Use mimalloc as the global allocator; image buffers churn a lot of large allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize telemetry, state and routes
    let (_state, router) = lookbook_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    lookbook_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
