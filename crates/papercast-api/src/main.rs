use papercast_core::Config;

// Use mimalloc as the global allocator for better performance,
// especially in musl-based containers where the default allocator is slow.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration first so a bad environment fails fast
    let config = Config::from_env()?;

    // Initialize telemetry, build state, and wire up routes
    let (_state, app) = papercast_api::setup::initialize_app(config.clone()).await?;

    // Start server with graceful shutdown
    papercast_api::setup::server::start_server(&config, app).await?;

    Ok(())
}
