use std::{future::Future, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::http;
use crate::service::UserService;

/// Serves the user API on an already-bound listener.
pub struct Server {
    listener: TcpListener,
    service: Arc<UserService>,
}

impl Server {
    pub fn new(listener: TcpListener, service: UserService) -> Self {
        Self {
            listener,
            service: Arc::new(service),
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until `shutdown` resolves, then lets in-flight
    /// requests finish.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Server { listener, service } = self;
        axum::serve(listener, http::router(service))
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("server shutting down");
            })
            .await
            .context("server terminated with error")
    }

    pub async fn run_until_ctrl_c(self) -> Result<()> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = ?err, "failed to install ctrl-c handler");
            }
        })
        .await
    }
}
