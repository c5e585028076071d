//! Formula validation tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::success_result;
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_value};
use crate::core::session::{PeerSession, ToolSession};
use crate::domains::validation::validate;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for the validate_formula tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateFormulaParams {
    /// Formula text, e.g. `y = sin(x) / x`.
    pub formula: String,
}

/// Checks formula syntax and explains errors in plain language.
pub struct ValidateFormulaTool;

impl ValidateFormulaTool {
    pub const NAME: &'static str = "validate_formula";

    pub const DESCRIPTION: &'static str = "Validate the syntax of a math formula. Invalid formulas come back with a plain-language explanation of the error.";

    /// An invalid formula is still a successful call; the explanation is the
    /// answer.
    #[instrument(skip_all, fields(formula = %params.formula))]
    pub async fn execute(params: &ValidateFormulaParams, session: &dyn ToolSession) -> CallToolResult {
        info!("Validating formula '{}'", params.formula);
        let result = validate(session, &params.formula).await;
        success_result(result.message())
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: &dyn ToolSession,
    ) -> Result<serde_json::Value, ToolError> {
        let params: ValidateFormulaParams =
            parse_arguments(arguments).map_err(ToolError::invalid_arguments)?;
        let result = Self::execute(&params, session).await;
        to_http_value(&result).map_err(ToolError::internal)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ValidateFormulaParams>().into(),
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
                let params: ValidateFormulaParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SamplingError;
    use crate::core::session::recording::RecordingSession;
    use crate::domains::tools::definitions::common::result_text;

    fn params(formula: &str) -> ValidateFormulaParams {
        ValidateFormulaParams {
            formula: formula.to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_formula_echoes_text() {
        let session = RecordingSession::new();
        let result = ValidateFormulaTool::execute(&params("y = x^2 + 1"), &session).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result_text(&result),
            "Formula 'y = x^2 + 1' is syntactically valid."
        );
    }

    #[tokio::test]
    async fn test_invalid_formula_uses_explanation() {
        let session = RecordingSession::replying(Ok("You forgot a closing bracket.".to_string()));
        let result = ValidateFormulaTool::execute(&params("sin(x"), &session).await;
        assert_eq!(result.is_error, Some(false));
        let text = result_text(&result);
        assert!(text.contains("'sin(x'"));
        assert!(text.ends_with("You forgot a closing bracket."));
    }

    #[tokio::test]
    async fn test_invalid_formula_without_sampling_keeps_detail() {
        let session = RecordingSession::replying(Err(SamplingError::Unavailable));
        let result = ValidateFormulaTool::execute(&params("x^"), &session).await;
        assert!(result_text(&result).contains("Details: Syntax error"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_validate_http_handler_missing_formula() {
        let session = crate::core::session::DetachedSession::new();
        let result = ValidateFormulaTool::http_handler(serde_json::json!({}), &session).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
