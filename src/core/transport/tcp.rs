//! TCP transport.
//!
//! Each accepted socket gets its own rmcp service speaking line-delimited
//! JSON-RPC. Ctrl-C stops the accept loop; connections already being served
//! finish on their own.

use rmcp::ServiceExt;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportConfig, TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Backoff after a failed `accept`.
const ACCEPT_RETRY_DELAY: std::time::Duration = std::time::Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Returns `None` unless `config` selects TCP.
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Tcp(tcp) => Some(Self::new(tcp.clone())),
            _ => None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept clients until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    if let Err(e) = signal {
                        warn!("Failed to listen for shutdown signal: {}", e);
                    }
                    info!("No longer accepting TCP clients");
                    return Ok(());
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            debug!("TCP_NODELAY not set for {}: {}", peer, e);
                        }
                        tokio::spawn(serve_client(server.clone(), stream, peer));
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    }
                },
            }
        }
    }
}

async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    info!("Accepted connection from {}", peer);

    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!("MCP handshake with {} failed: {}", peer, e);
            return;
        }
    };

    match service.waiting().await {
        Ok(reason) => info!("Client {} disconnected ({:?})", peer, reason),
        Err(e) => warn!("Error while serving client {}: {:?}", peer, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_built_for_tcp_config() {
        let tcp = TransportConfig::Tcp(TcpConfig {
            host: "127.0.0.1".to_string(),
            port: 4100,
        });
        let transport = TcpTransport::from_transport_config(&tcp).unwrap();
        assert_eq!(transport.address(), "127.0.0.1:4100");

        #[cfg(feature = "stdio")]
        assert!(TcpTransport::from_transport_config(&TransportConfig::Stdio).is_none());
    }
}
