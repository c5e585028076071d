//! Greeting tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::success_result;
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_value};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

fn default_name() -> String {
    "World".to_string()
}

/// Parameters for the hello tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HelloParams {
    /// Who to greet.
    #[serde(default = "default_name")]
    pub name: String,
}

/// Says hello. Handy for checking that a client can reach the server.
pub struct HelloTool;

impl HelloTool {
    pub const NAME: &'static str = "hello";

    pub const DESCRIPTION: &'static str = "Say hello to someone.";

    pub fn execute(params: &HelloParams) -> CallToolResult {
        info!("Hello tool called for '{}'", params.name);
        success_result(format!("Hello, {}!", params.name))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: HelloParams =
            parse_arguments(arguments).map_err(ToolError::invalid_arguments)?;
        to_http_value(&Self::execute(&params)).map_err(ToolError::internal)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<HelloParams>().into(),
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
            async move {
                let params: HelloParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::result_text;

    #[test]
    fn test_hello_default_name() {
        let params: HelloParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let result = HelloTool::execute(&params);
        assert_eq!(result_text(&result), "Hello, World!");
    }

    #[test]
    fn test_hello_named() {
        let params = HelloParams {
            name: "Ada".to_string(),
        };
        assert_eq!(result_text(&HelloTool::execute(&params)), "Hello, Ada!");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_hello_http_handler() {
        let value = HelloTool::http_handler(serde_json::json!({ "name": "Ada" })).unwrap();
        assert_eq!(value["content"][0]["text"], "Hello, Ada!");
    }
}
