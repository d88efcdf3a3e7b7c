//! bookshelf CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookshelf::cli::Cli;
use bookshelf::LibraryError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Parse and execute CLI; session failures are reported, not propagated
    let cli = Cli::parse();
    if let Err(e) = cli.execute().await {
        match e.downcast_ref::<LibraryError>() {
            Some(library_error) => tracing::error!("Library Error: {}", library_error),
            None => tracing::error!("Unexpected Error: {:#}", e),
        }
    }

    Ok(())
}
