//! Helpers shared by the tool definitions.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Text summary plus structured content, falling back to text only.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            success_result(summary)
        }
    }
}

/// Parse tool arguments into their params struct.
pub fn parse_arguments<P: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<P, String> {
    serde_json::from_value(arguments).map_err(|e| e.to_string())
}

/// Serialize a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn to_http_value(result: &CallToolResult) -> Result<serde_json::Value, String> {
    serde_json::to_value(result).map_err(|e| e.to_string())
}

/// The text of the first content item.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(t) => &t.text,
        _ => panic!("Expected text content"),
    }
}
