use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use newsgate::secrets::Secrets;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "newsgate",
    about = "News-driven trade / no-trade webhook relay"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/newsgate.toml")]
    config: PathBuf,

    /// Override the bind address from the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Run the relay once, print the payload and exit instead of serving HTTP
    #[arg(long)]
    once: bool,

    /// Pretty-print the payload (with --once)
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (respects RUST_LOG env var)
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    dotenvy::dotenv().ok();

    let config = newsgate::load_config(&cli.config)?;
    let secrets = Secrets::load(&config.secrets).context("Failed to load secrets")?;
    let relay = Arc::new(newsgate::build_relay(&config, &secrets).context("Failed to build relay")?);

    if cli.once {
        let payload = relay.respond().await;
        let output = if cli.pretty {
            serde_json::to_string_pretty(&payload)?
        } else {
            serde_json::to_string(&payload)?
        };
        println!("{output}");

        if !payload.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let bind = cli.bind.as_deref().unwrap_or(&config.server.bind);
    newsgate::serve(relay, bind, &config.server.route).await
}
