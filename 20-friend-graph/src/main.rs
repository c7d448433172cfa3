use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use friend_graph::{cli::Cli, server::Server, service::UserService};

/// Used when `RUST_LOG` is unset. `TraceLayer` emits its request spans at
/// debug level, so `tower_http` is raised to make each request visible.
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = cli.initial_store()?;
    info!(users = store.len(), "store initialised");

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    let server = Server::new(listener, UserService::new(store));
    let addr = server.local_addr()?;
    info!("listening on {}", addr);

    if let Err(err) = server.run_until_ctrl_c().await {
        warn!("server exited with error: {err:?}");
        return Err(err);
    }

    Ok(())
}
