//! Turns technical parse failures into plain-language explanations.

use crate::core::session::{SamplingError, ToolSession};

/// The sampling prompt for a technical error detail.
pub fn explanation_prompt(technical: &str) -> String {
    format!(
        "Please explain this math formula syntax error in simple terms for a non-programmer: {}",
        technical
    )
}

/// Ask the client's model to explain `technical`.
pub async fn explain(session: &dyn ToolSession, technical: &str) -> Result<String, SamplingError> {
    session.sample(&explanation_prompt(technical)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::recording::RecordingSession;

    #[tokio::test]
    async fn test_prompt_carries_only_the_detail() {
        let session = RecordingSession::replying(Ok("You left an operator dangling.".to_string()));
        let text = explain(&session, "Details: Syntax error").await.unwrap();
        assert_eq!(text, "You left an operator dangling.");

        let prompts = session.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with(": Details: Syntax error"));
    }

    #[tokio::test]
    async fn test_propagates_sampling_failure() {
        let session = RecordingSession::replying(Err(SamplingError::EmptyResponse));
        assert_eq!(
            explain(&session, "Details: x").await,
            Err(SamplingError::EmptyResponse)
        );
    }
}
