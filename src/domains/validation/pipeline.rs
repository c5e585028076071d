//! The validation pipeline: parse, then explain failures.

use crate::core::session::{LogLevel, ToolSession};
use crate::domains::formula::Formula;

use super::explain::explain;

/// Outcome of validating a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid { formula: String },
    /// `explanation` is the model's explanation, or the technical detail when
    /// no explanation could be obtained.
    Invalid { formula: String, explanation: String },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Text shown to the client.
    pub fn message(&self) -> String {
        match self {
            Self::Valid { formula } => format!("Formula '{}' is syntactically valid.", formula),
            Self::Invalid {
                formula,
                explanation,
            } => format!(
                "The formula '{}' is invalid. Here is an explanation: {}",
                formula, explanation
            ),
        }
    }
}

/// Check the syntax of `formula`.
///
/// Never fails: a sampling failure degrades to the technical detail.
pub async fn validate(session: &dyn ToolSession, formula: &str) -> ValidationResult {
    let error = match Formula::parse(formula) {
        Ok(_) => {
            return ValidationResult::Valid {
                formula: formula.to_string(),
            };
        }
        Err(e) => e,
    };

    let technical = format!("Details: {}", error);
    session
        .log(
            LogLevel::Info,
            &format!("Validation failed with technical error: {}", technical),
        )
        .await;

    let explanation = match explain(session, &technical).await {
        Ok(text) => text,
        Err(e) => {
            session
                .log(LogLevel::Error, &format!("LLM Sampling failed: {}", e))
                .await;
            technical
        }
    };

    ValidationResult::Invalid {
        formula: formula.to_string(),
        explanation,
    }
}
