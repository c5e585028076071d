//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
#[cfg(feature = "http")]
use crate::core::session::ToolSession;
use super::definitions::{
    AnalyzeFormulaTool, HelloTool, PlotMathFunctionTool, PlotMultipleFunctionsTool,
    ValidateFormulaTool,
};
use super::services::ToolServices;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    services: Arc<ToolServices>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(services: Arc<ToolServices>) -> Self {
        Self { services }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            HelloTool::NAME,
            ValidateFormulaTool::NAME,
            PlotMathFunctionTool::NAME,
            AnalyzeFormulaTool::NAME,
            PlotMultipleFunctionsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            HelloTool::to_tool(),
            ValidateFormulaTool::to_tool(),
            PlotMathFunctionTool::to_tool(),
            AnalyzeFormulaTool::to_tool(),
            PlotMultipleFunctionsTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        session: &dyn ToolSession,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            HelloTool::NAME => HelloTool::http_handler(arguments),
            ValidateFormulaTool::NAME => ValidateFormulaTool::http_handler(arguments, session).await,
            PlotMathFunctionTool::NAME => {
                PlotMathFunctionTool::http_handler(arguments, self.services.clone(), session).await
            }
            AnalyzeFormulaTool::NAME => AnalyzeFormulaTool::http_handler(arguments, session).await,
            PlotMultipleFunctionsTool::NAME => {
                PlotMultipleFunctionsTool::http_handler(arguments, self.services.clone(), session)
                    .await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::services::testing::local_only;

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(local_only());
        let names = registry.tool_names();
        assert_eq!(
            names,
            vec![
                "hello",
                "validate_formula",
                "plot_math_function",
                "analyze_formula",
                "plot_multiple_functions",
            ]
        );
    }

    #[test]
    fn test_all_tools_have_descriptions() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some_and(|d| !d.is_empty()));
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_hello() {
        let registry = ToolRegistry::new(local_only());
        let session = crate::core::session::DetachedSession::new();
        let result = registry
            .call_tool("hello", serde_json::json!({}), &session)
            .await
            .unwrap();
        assert_eq!(result["content"][0]["text"], "Hello, World!");
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(local_only());
        let session = crate::core::session::DetachedSession::new();
        let result = registry
            .call_tool("unknown", serde_json::json!({}), &session)
            .await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
