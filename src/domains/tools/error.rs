//! Tool-specific error types.

use thiserror::Error;

/// Errors that prevent a tool call from producing a result at all.
///
/// Failures inside a tool (a bad formula, a failed render) are reported in
/// the tool result instead.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Arguments did not deserialize into the tool's params.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The result could not be serialized back to JSON.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ToolError::not_found("nope").to_string(), "Tool not found: nope");
        assert_eq!(
            ToolError::invalid_arguments("missing field `formula`").to_string(),
            "Invalid arguments: missing field `formula`"
        );
    }
}
