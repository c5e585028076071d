//! Desmos MCP Server Library
//!
//! A Model Context Protocol (MCP) server that validates, analyzes and plots
//! single-variable math formulas, organized by domains.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the per-request session
//!   capability, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **formula**: parsing, derivatives, domain/range and equation solving
//!   - **plotting**: remote and local rendering, progress and persistence
//!   - **validation**: syntax checks with natural-language explanations
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: data resources that can be read by clients
//!   - **prompts**: prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use desmos_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
