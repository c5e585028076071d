//! Multi-function plotting tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, success_result};
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_value};
use crate::core::session::{PeerSession, ToolSession};
use crate::domains::plotting::{PlotOutcome, PlotRange};
use crate::domains::tools::ToolServices;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the plot_multiple_functions tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlotMultipleFunctionsParams {
    /// Formulas in `x`, drawn and listed in the legend in this order.
    pub formulas: Vec<String>,

    /// `[low, high]` of the shared x axis. Defaults to `[-10, 10]`.
    #[serde(default)]
    pub x_range: Option<[f64; 2]>,

    /// `[low, high]` of the shared y axis. Scaled to the data when omitted.
    #[serde(default)]
    pub y_range: Option<[f64; 2]>,
}

/// Plots several functions on one set of axes.
pub struct PlotMultipleFunctionsTool;

impl PlotMultipleFunctionsTool {
    pub const NAME: &'static str = "plot_multiple_functions";

    pub const DESCRIPTION: &'static str = "Plot several functions of x on the same axes with a legend. Fails as a whole if any formula is invalid. Returns the PNG image as a data URI.";

    #[instrument(skip_all, fields(count = params.formulas.len()))]
    pub async fn execute(
        params: &PlotMultipleFunctionsParams,
        services: &ToolServices,
        session: &dyn ToolSession,
    ) -> CallToolResult {
        info!("Multi-plot tool called with {} formulas", params.formulas.len());

        let ranges = PlotRange::x_axis(params.x_range)
            .and_then(|x| PlotRange::y_axis(params.y_range).map(|y| (x, y)));
        let (x_range, y_range) = match ranges {
            Ok(ranges) => ranges,
            Err(e) => return error_result(&format!("Invalid plot range: {}", e)),
        };

        match services
            .plots()
            .plot_multiple(session, &params.formulas, x_range, y_range)
            .await
        {
            PlotOutcome::Done(text) => success_result(text),
            PlotOutcome::Failed(text) => error_result(&text),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        services: Arc<ToolServices>,
        session: &dyn ToolSession,
    ) -> Result<serde_json::Value, ToolError> {
        let params: PlotMultipleFunctionsParams =
            parse_arguments(arguments).map_err(ToolError::invalid_arguments)?;
        let result = Self::execute(&params, &services, session).await;
        to_http_value(&result).map_err(ToolError::internal)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<PlotMultipleFunctionsParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(services: Arc<ToolServices>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let session = PeerSession::from_request(&ctx.request_context);
            let services = services.clone();
            async move {
                let params: PlotMultipleFunctionsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &services, &session).await)
            }
            .boxed()
        })
    }
}
