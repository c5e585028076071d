//! The crate-wide error type.
//!
//! Tool failures never reach this type: they are reported inside the tool
//! result. It covers startup (building the remote client, binding a
//! transport) and library callers that want one error for every domain.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    #[error("Formula error: {0}")]
    Formula(#[from] crate::domains::formula::FormulaError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] crate::domains::formula::AnalysisError),

    #[error("Render error: {0}")]
    Render(#[from] crate::domains::plotting::RenderError),

    /// The remote render client could not be built.
    #[error("Remote renderer error: {0}")]
    Remote(#[from] crate::domains::plotting::RemoteError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::domains::plotting::StorageError),

    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::formula::FormulaError;

    #[test]
    fn test_domain_errors_convert() {
        let err: Error = FormulaError::unsupported_variable("t", "x").into();
        assert!(matches!(err, Error::Formula(_)));
        assert!(err.to_string().starts_with("Formula error: Unsupported variable 't'"));

        let err: Error = crate::domains::plotting::RemoteError::MissingCredential.into();
        assert_eq!(err.to_string(), "Remote renderer error: No Desmos API key configured");
    }
}
