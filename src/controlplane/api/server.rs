//! API Server
//!
//! Runs the REST server for the validation API.

use crate::error::{Error, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

use super::rest::RestRouter;
use crate::controlplane::{OperatorRegistry, Orchestrator};

/// Default REST port
pub const DEFAULT_REST_PORT: u16 = 8090;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// REST API bind address
    pub rest_addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            rest_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_REST_PORT)),
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// REST API server with graceful shutdown
pub struct ApiServer {
    config: ApiServerConfig,
    orchestrator: Arc<Orchestrator>,
    registry: Arc<OperatorRegistry>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiServerConfig,
        orchestrator: Arc<Orchestrator>,
        registry: Arc<OperatorRegistry>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            orchestrator,
            registry,
            shutdown_tx,
        }
    }

    /// Run until the server stops or shutdown is triggered
    pub async fn run(&self) -> Result<()> {
        info!(rest_addr = %self.config.rest_addr, "starting API server");

        let rest_handle = self.spawn_rest_server();

        match rest_handle.await {
            Ok(result) => result,
            Err(e) => {
                error!("REST server task failed: {:?}", e);
                Err(Error::Internal(format!("REST server task failed: {}", e)))
            }
        }
    }

    /// Spawn the REST server
    fn spawn_rest_server(&self) -> tokio::task::JoinHandle<Result<()>> {
        let addr = self.config.rest_addr;
        let orchestrator = self.orchestrator.clone();
        let registry = self.registry.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            run_rest_server(addr, orchestrator, registry, shutdown_rx).await
        })
    }

    /// Handle to trigger shutdown from another task
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Run the REST API server
async fn run_rest_server(
    addr: SocketAddr,
    orchestrator: Arc<Orchestrator>,
    registry: Arc<OperatorRegistry>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let app = RestRouter::new(orchestrator, registry).build();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind REST server: {}", e)))?;

    info!("REST API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("REST server shutting down");
        })
        .await
        .map_err(|e| Error::Internal(format!("REST server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controlplane::ValidationMetrics;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.rest_addr.port(), 8090);
        assert!(config.rest_addr.ip().is_unspecified());
    }

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let registry = OperatorRegistry::new();
        let orchestrator = Orchestrator::new(registry.clone(), ValidationMetrics::new().unwrap());
        let config = ApiServerConfig {
            rest_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        };
        let server = Arc::new(ApiServer::new(config, orchestrator, registry));

        let shutdown = server.shutdown_handle();
        let running = {
            let server = server.clone();
            tokio::spawn(async move { server.run().await })
        };

        // Retry until the REST task has subscribed
        let result = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let _ = shutdown.send(());
                if running.is_finished() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await;

        assert!(result.is_ok());
    }
}
