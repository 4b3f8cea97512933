use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::Router;
use relay_config::RelayConfig;
use relay_upstream::{build_http_client, GitHubClient, OpenAIClient, UpstreamResult};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;

/// Read-only state shared by every request.
///
/// Both clients wrap the same connection pool.
pub struct AppState {
    pub openai: OpenAIClient,
    pub github: GitHubClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> UpstreamResult<Self> {
        let http = build_http_client(&config.server)?;
        Ok(Self {
            openai: OpenAIClient::new(
                http.clone(),
                config.openai.clone(),
                config.credentials.openai.clone(),
            ),
            github: GitHubClient::new(
                http,
                config.github.clone(),
                config.credentials.github.clone(),
            ),
            start_time: Instant::now(),
        })
    }
}

pub struct GatewayServer {
    state: Arc<AppState>,
    bind_addr: String,
}

impl GatewayServer {
    pub fn new(config: &RelayConfig) -> UpstreamResult<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
            bind_addr: config.server.bind_addr(),
        })
    }

    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Binds the configured address and serves until Ctrl-C or SIGTERM.
    pub async fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", self.bind_addr))?;

        info!(addr = %self.bind_addr, "mcp-relay listening");
        self.run(listener).await
    }

    /// Serves on an already-bound listener.
    ///
    /// A handler whose client disconnects is dropped together with its
    /// in-flight upstream request.
    pub async fn run(&self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("mcp-relay shut down");
        Ok(())
    }
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let server = GatewayServer::new(&config).context("failed to build upstream clients")?;
    server.start().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
