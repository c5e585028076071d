//! Transports, one per cargo feature.
//!
//! | Feature | Transport | Sessions |
//! |---|---|---|
//! | `stdio` (default) | stdin/stdout | one client, full peer session |
//! | `tcp` | line-delimited JSON-RPC, one rmcp service per socket | full peer session |
//! | `http` | JSON-RPC over POST (axum) | detached: no progress or sampling |
//!
//! TCP and HTTP stop on Ctrl-C. STDIO stops when the client closes stdin.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
