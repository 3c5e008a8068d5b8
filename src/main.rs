mod console;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_engine::{Scheduler, config::EngineConfig};
use tokio::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = EngineConfig::from_env()?;

    // stdout carries responses, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = config.initial_settings()?;
    info!(
        "Starting slotbook console for {} (max {}/week)",
        settings.name, settings.max_interviews_per_week
    );

    let scheduler = Scheduler::new(settings, &config);
    console::run(&scheduler, BufReader::new(io::stdin()), io::stdout()).await?;

    info!("Input closed, shutting down");
    Ok(())
}
