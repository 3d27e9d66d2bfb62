//! Ticket Triage Service - Main Entry Point

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    api::init_logging();

    let settings = api::Settings::load()?;

    info!("=== Ticket Triage v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Starting support ticket triage service...");

    api::run_server(settings).await
}
