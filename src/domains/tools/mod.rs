//! Tools domain module.
//!
//! Tools are the functions MCP clients call: `hello`, `validate_formula`,
//! `plot_math_function`, `analyze_formula` and `plot_multiple_functions`.
//!
//! Every tool is reachable two ways: through the rmcp [`ToolRouter`] built by
//! [`build_tool_router`] (STDIO and TCP, with a live peer session), and
//! through [`ToolRegistry::call_tool`] for the HTTP transport. A new tool
//! has to be added to both.
//!
//! [`ToolRouter`]: rmcp::handler::server::tool::ToolRouter

pub mod definitions;
mod error;
mod registry;
pub mod router;
pub mod services;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
pub use services::ToolServices;
