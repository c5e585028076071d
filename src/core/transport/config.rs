//! Transport selection.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio`, `tcp` or `http`); anything
//! else falls back to the first compiled-in transport.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Which transport to serve on, with its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC on raw sockets.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Allow any origin, for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Read a port variable, keeping `default` when it is unset or not a port.
#[cfg(any(feature = "tcp", feature = "http"))]
fn port_from_env(var: &str, default: u16) -> u16 {
    match std::env::var(var) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            warn!("Invalid {} '{}', using {}", var, value, default);
            default
        }),
        Err(_) => default,
    }
}

impl TransportConfig {
    /// The first compiled-in transport, in stdio, tcp, http order.
    fn fallback() -> Self {
        #[cfg(feature = "stdio")]
        let config = Self::Stdio;

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        let config = Self::Tcp(TcpConfig::default());

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        let config = Self::Http(HttpConfig::default());

        config
    }

    /// Load the transport choice from `MCP_TRANSPORT` and its `MCP_TCP_*` or
    /// `MCP_HTTP_*` settings.
    pub fn from_env() -> Self {
        let requested = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match requested.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig {
                port: port_from_env("MCP_TCP_PORT", DEFAULT_TCP_PORT),
                host: std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host()),
            }),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig {
                port: port_from_env("MCP_HTTP_PORT", DEFAULT_HTTP_PORT),
                host: std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host()),
                rpc_path: std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path()),
                enable_cors: std::env::var("MCP_HTTP_CORS")
                    .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
                    .unwrap_or(true),
            }),
            "" => Self::fallback(),
            other => {
                let config = Self::fallback();
                warn!(
                    "Transport '{}' is not available in this build, using {}",
                    other,
                    config.description()
                );
                config
            }
        }
    }

    /// Human-readable form for logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
