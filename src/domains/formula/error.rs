//! Formula-specific error types.

use thiserror::Error;

/// Errors that can occur while working with a formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// The formula text is not syntactically valid.
    #[error("Syntax error: {0}")]
    Parse(String),

    /// The formula uses a free variable other than the plotting variable.
    #[error("Unsupported variable '{found}': only '{expected}' may appear in the formula")]
    UnsupportedVariable { found: String, expected: String },

    #[error("Could not differentiate: {0}")]
    Derivative(String),

    /// The expression could not be compiled for numeric evaluation.
    #[error("Could not evaluate: {0}")]
    Evaluation(String),
}

impl FormulaError {
    /// Create a new "unsupported variable" error.
    pub fn unsupported_variable(found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::UnsupportedVariable {
            found: found.into(),
            expected: expected.into(),
        }
    }

    pub fn parse(detail: impl ToString) -> Self {
        Self::Parse(detail.to_string())
    }
}

/// Errors returned by the analysis engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The blocking analysis task could not complete.
    #[error("Analysis task failed: {0}")]
    Task(String),
}
