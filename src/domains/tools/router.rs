//! Tool Router - builds the rmcp ToolRouter.
//!
//! Used by the STDIO/TCP transports. Each tool knows how to create its own
//! route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AnalyzeFormulaTool, HelloTool, PlotMathFunctionTool, PlotMultipleFunctionsTool,
    ValidateFormulaTool,
};
use super::services::ToolServices;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(services: Arc<ToolServices>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(HelloTool::create_route())
        .with_route(ValidateFormulaTool::create_route())
        .with_route(PlotMathFunctionTool::create_route(services.clone()))
        .with_route(AnalyzeFormulaTool::create_route())
        .with_route(PlotMultipleFunctionsTool::create_route(services))
}
