//! `mcp-relay` binary entrypoint.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use relay_config::{load_config, LoadOptions};
use relay_gateway::serve;

#[derive(Parser)]
#[command(name = "mcp-relay")]
#[command(version, about = "Forward requests to the OpenAI and GitHub APIs", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./relay.yml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Env file holding OPENAI_API_KEY / GITHUB_API_KEY (defaults to ./.env if present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Respect `RUST_LOG` if set; otherwise default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
        env_file: cli.env_file,
    };

    let mut config = load_config(&options).context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    serve(config).await
}
