//! Errors raised while resolving or rendering a prompt.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// A required argument was not supplied by the client.
    #[error("Prompt argument '{0}' is required")]
    MissingArgument(String),

    /// A message template is malformed, e.g. an unclosed `{{#if}}` block.
    #[error("Could not render prompt template: {0}")]
    Template(String),
}

impl PromptError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }
}
