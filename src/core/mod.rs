//! Server plumbing shared by every domain: configuration, errors, the
//! per-request [`ToolSession`] capability, the rmcp handler and transports.

pub mod config;
pub mod error;
pub mod server;
pub mod session;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use session::{DetachedSession, LogLevel, PeerSession, ProgressUpdate, SamplingError, ToolSession};
pub use transport::{TransportConfig, TransportService};
