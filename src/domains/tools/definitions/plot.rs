//! Single-formula plotting tool.

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
use crate::domains::plotting::{PlotOutcome, PlotRange, SinglePlot};
use crate::domains::tools::ToolServices;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

fn default_use_api() -> bool {
    true
}

/// Parameters for the plot_math_function tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlotMathFunctionParams {
    /// Formula in `x`, e.g. `y = x^2 - 3`.
    pub formula: String,

    /// `[low, high]` of the x axis. Defaults to `[-10, 10]`.
    #[serde(default)]
    pub x_range: Option<[f64; 2]>,

    /// `[low, high]` of the y axis. Scaled to the data when omitted.
    #[serde(default)]
    pub y_range: Option<[f64; 2]>,

    /// Try the Desmos API before rendering locally.
    #[serde(default = "default_use_api")]
    pub use_api: bool,
}

/// Plots one function and returns the image as a data URI.
pub struct PlotMathFunctionTool;

impl PlotMathFunctionTool {
    pub const NAME: &'static str = "plot_math_function";

    pub const DESCRIPTION: &'static str = "Plot a function of x. Uses the Desmos API when available and falls back to local rendering. Returns the PNG image as a data URI.";

    #[instrument(skip_all, fields(formula = %params.formula, use_api = params.use_api))]
    pub async fn execute(
        params: &PlotMathFunctionParams,
        services: &ToolServices,
        session: &dyn ToolSession,
    ) -> CallToolResult {
        info!("Plot tool called for '{}'", params.formula);

        let ranges = PlotRange::x_axis(params.x_range)
            .and_then(|x| PlotRange::y_axis(params.y_range).map(|y| (x, y)));
        let (x_range, y_range) = match ranges {
            Ok(ranges) => ranges,
            Err(e) => return error_result(&format!("Invalid plot range: {}", e)),
        };

        let request = SinglePlot {
            formula: params.formula.clone(),
            x_range,
            y_range,
            use_api: params.use_api,
        };
        match services.plots().plot_single(session, &request).await {
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
        let params: PlotMathFunctionParams =
            parse_arguments(arguments).map_err(ToolError::invalid_arguments)?;
        let result = Self::execute(&params, &services, session).await;
        to_http_value(&result).map_err(ToolError::internal)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<PlotMathFunctionParams>().into(),
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
                let params: PlotMathFunctionParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &services, &session).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::recording::RecordingSession;
    use crate::domains::plotting::decode_data_uri;
    use crate::domains::tools::definitions::common::result_text;
    use crate::domains::tools::services::testing::{DownRemote, FixedRemote, local_only, with_remote};

    fn params(formula: &str, use_api: bool) -> PlotMathFunctionParams {
        serde_json::from_value(serde_json::json!({
            "formula": formula,
            "use_api": use_api,
        }))
        .unwrap()
    }

    fn image_of(text: &str) -> Vec<u8> {
        let uri = text.split("Image: ").nth(1).unwrap();
        decode_data_uri(uri).unwrap()
    }

    #[test]
    fn test_param_defaults() {
        let params: PlotMathFunctionParams =
            serde_json::from_value(serde_json::json!({ "formula": "x" })).unwrap();
        assert!(params.use_api);
        assert!(params.x_range.is_none());
        assert!(params.y_range.is_none());
    }

    #[tokio::test]
    async fn test_local_plot_embeds_image() {
        let services = local_only();
        let session = RecordingSession::new();
        let result = PlotMathFunctionTool::execute(&params("x^2", true), &services, &session).await;

        assert_eq!(result.is_error, Some(false));
        let text = result_text(&result);
        assert!(text.starts_with("Successfully plotted 'x^2' using local rendering."));
        assert_eq!(image_of(text), b"x^2");
    }

    #[tokio::test]
    async fn test_remote_image_is_used() {
        let services = with_remote(FixedRemote(b"REMOTE".to_vec()));
        let session = RecordingSession::new();
        let result = PlotMathFunctionTool::execute(&params("x", true), &services, &session).await;

        let text = result_text(&result);
        assert!(text.starts_with("Successfully plotted 'x' using Desmos API."));
        assert_eq!(image_of(text), b"REMOTE");
    }

    #[tokio::test]
    async fn test_failing_remote_matches_local_only() {
        let session = RecordingSession::new();
        let fallback = PlotMathFunctionTool::execute(
            &params("sin(x)", true),
            &with_remote(DownRemote),
            &session,
        )
        .await;
        let local = PlotMathFunctionTool::execute(
            &params("sin(x)", false),
            &with_remote(DownRemote),
            &session,
        )
        .await;
        assert_eq!(result_text(&fallback), result_text(&local));
    }

    #[tokio::test]
    async fn test_parse_failure_is_error_result() {
        let services = local_only();
        let session = RecordingSession::new();
        let result = PlotMathFunctionTool::execute(&params("x +", false), &services, &session).await;

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("Error plotting formula 'x +' locally."));
        assert!(!text.contains("data:image/png"));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let services = local_only();
        let session = RecordingSession::new();
        let params: PlotMathFunctionParams = serde_json::from_value(serde_json::json!({
            "formula": "x",
            "x_range": [5.0, -5.0],
        }))
        .unwrap();
        let result = PlotMathFunctionTool::execute(&params, &services, &session).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Invalid plot range:"));
        assert!(session.updates().is_empty());
    }

    #[tokio::test]
    async fn test_overflowing_range_rejected() {
        let services = local_only();
        let session = RecordingSession::new();
        let params: PlotMathFunctionParams = serde_json::from_value(serde_json::json!({
            "formula": "x",
            "x_range": [-1e308, 1e308],
        }))
        .unwrap();
        let result = PlotMathFunctionTool::execute(&params, &services, &session).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("too wide"));
        assert!(session.updates().is_empty());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_plot_http_handler() {
        let value = PlotMathFunctionTool::http_handler(
            serde_json::json!({ "formula": "x", "use_api": false }),
            local_only(),
            &crate::core::session::DetachedSession::new(),
        )
        .await
        .unwrap();
        let text = value["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Image: data:image/png;base64,"));
    }
}
