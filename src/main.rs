use meetbeacon::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting meetbeacon");

    // Load configuration
    let config = startup::load_config()?;

    // Serve until shut down
    startup::start_server(config).await?;

    Ok(())
}
