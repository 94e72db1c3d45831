use clap::Parser;
use tracing_subscriber::EnvFilter;

use docvault_api::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = docvault_api::config::config();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.api.log_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting DocVault API in {:?} mode", config.environment);

    if let Err(e) = cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
