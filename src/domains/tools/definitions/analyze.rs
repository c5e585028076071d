//! Formula analysis tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_value};
use crate::core::session::{LogLevel, PeerSession, ToolSession};
use crate::domains::formula::analysis::{AnalysisDepth, AnalysisReport, analyze, failure_message};
use crate::domains::formula::AnalysisError;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the analyze_formula tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeFormulaParams {
    /// Formula in `x`.
    pub formula: String,

    /// `basic` (domain), `detailed` (domain and range) or `critical_points`
    /// (derivative and critical points).
    #[serde(default)]
    pub analysis_type: AnalysisDepth,
}

/// Reports domain, range, derivative or critical points of a formula.
pub struct AnalyzeFormulaTool;

impl AnalyzeFormulaTool {
    pub const NAME: &'static str = "analyze_formula";

    pub const DESCRIPTION: &'static str = "Analyze a function of x. 'basic' reports the domain, 'detailed' adds the range and 'critical_points' reports the derivative and its real roots.";

    #[instrument(skip_all, fields(formula = %params.formula, depth = %params.analysis_type))]
    pub async fn execute(params: &AnalyzeFormulaParams, session: &dyn ToolSession) -> CallToolResult {
        let formula = params.formula.clone();
        let depth = params.analysis_type;
        info!("Analyze tool called for '{}' ({})", formula, depth);
        session
            .log(
                LogLevel::Info,
                &format!("Performing '{}' analysis on '{}'", depth, formula),
            )
            .await;

        match run_analysis(formula, depth).await {
            Ok(report) => structured_result(report.to_string(), &report),
            Err(e) => error_result(&failure_message(&params.formula, depth, &e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: &dyn ToolSession,
    ) -> Result<serde_json::Value, ToolError> {
        let params: AnalyzeFormulaParams =
            parse_arguments(arguments).map_err(ToolError::invalid_arguments)?;
        let result = Self::execute(&params, session).await;
        to_http_value(&result).map_err(ToolError::internal)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<AnalyzeFormulaParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let session = PeerSession::from_request(&ctx.request_context);
            async move {
                let params: AnalyzeFormulaParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

/// Symbolic work can take a while; keep it off the async workers.
async fn run_analysis(formula: String, depth: AnalysisDepth) -> Result<AnalysisReport, AnalysisError> {
    tokio::task::spawn_blocking(move || analyze(&formula, depth))
        .await
        .map_err(|e| AnalysisError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::recording::RecordingSession;
    use crate::domains::tools::definitions::common::result_text;

    fn params(formula: &str, depth: &str) -> AnalyzeFormulaParams {
        serde_json::from_value(serde_json::json!({
            "formula": formula,
            "analysis_type": depth,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_basic_reports_domain_only() {
        let session = RecordingSession::new();
        let result = AnalyzeFormulaTool::execute(&params("x^2", "basic"), &session).await;
        let text = result_text(&result);
        assert!(text.contains("Domain:"));
        assert!(!text.contains("Range:"));
    }

    #[tokio::test]
    async fn test_detailed_reports_domain_and_range() {
        let session = RecordingSession::new();
        let result = AnalyzeFormulaTool::execute(&params("x^2", "detailed"), &session).await;
        let text = result_text(&result);
        assert!(text.contains("- Domain: ℝ"));
        assert!(text.contains("- Range: [0, ∞)"));
    }

    #[tokio::test]
    async fn test_critical_points_structured() {
        let session = RecordingSession::new();
        let result = AnalyzeFormulaTool::execute(&params("x^2", "critical_points"), &session).await;

        assert_eq!(result.is_error, Some(false));
        assert!(result_text(&result).contains("- Critical Points: x = 0"));

        let structured = result.structured_content.expect("structured_content should exist");
        assert_eq!(structured["formula"], "x^2");
        assert_eq!(structured["depth"], "critical_points");
        assert_eq!(structured["fields"][0]["label"], "Derivative");
        assert_eq!(structured["fields"][1]["value"], "x = 0");
    }

    #[test]
    fn test_default_depth_is_basic() {
        let params: AnalyzeFormulaParams =
            serde_json::from_value(serde_json::json!({ "formula": "1/x" })).unwrap();
        assert_eq!(params.analysis_type, AnalysisDepth::Basic);
    }

    #[tokio::test]
    async fn test_failure_is_single_line_error() {
        let session = RecordingSession::new();
        let result = AnalyzeFormulaTool::execute(&params("sqrt(", "detailed"), &session).await;

        assert_eq!(result.is_error, Some(true));
        let text = result_text(&result);
        assert!(text.starts_with("Error analyzing formula 'sqrt(' ('detailed' analysis)."));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_unknown_depth_rejected() {
        let parsed: Result<AnalyzeFormulaParams, _> = serde_json::from_value(serde_json::json!({
            "formula": "x",
            "analysis_type": "everything",
        }));
        assert!(parsed.is_err());
    }
}
