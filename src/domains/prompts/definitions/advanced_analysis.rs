//! Advanced math analysis prompt definition.

use super::PromptDefinition;
use crate::domains::prompts::templates::MessageTemplate;
use rmcp::model::PromptArgument;

/// Starts a guided analysis of a function.
pub struct AdvancedMathAnalysisPrompt;

impl PromptDefinition for AdvancedMathAnalysisPrompt {
    const NAME: &'static str = "advanced_math_analysis";
    const DESCRIPTION: &'static str = "Guide user through deep analysis of complex functions.";

    fn messages() -> Vec<MessageTemplate> {
        vec![
            MessageTemplate::user(
                "I want to perform an advanced analysis on a function, focusing on \
                 {{#if analysis_focus}}{{analysis_focus}}{{else}}derivatives{{/if}}.",
            ),
            MessageTemplate::assistant("Of course. Please provide the function you'd like to analyze."),
        ]
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "analysis_focus".to_string(),
            title: None,
            description: Some(
                "Focus of the analysis (e.g., derivatives, integrals, limits). Defaults to derivatives."
                    .to_string(),
            ),
            required: Some(false),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_prompt_metadata() {
        assert_eq!(AdvancedMathAnalysisPrompt::NAME, "advanced_math_analysis");
        let args = AdvancedMathAnalysisPrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].required, Some(false));
        assert_eq!(AdvancedMathAnalysisPrompt::messages().len(), 2);
    }
}
