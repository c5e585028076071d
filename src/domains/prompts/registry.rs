//! The prompts this server offers, in listing order.

use super::definitions::{AdvancedMathAnalysisPrompt, BasicGraphingAssistantPrompt, PromptDefinition};
use super::templates::PromptTemplate;

fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate {
        name: P::NAME.to_string(),
        description: Some(P::DESCRIPTION.to_string()),
        arguments: P::arguments(),
        messages: P::messages(),
    }
}

pub fn get_all_prompts() -> Vec<PromptTemplate> {
    vec![
        build_template::<BasicGraphingAssistantPrompt>(),
        build_template::<AdvancedMathAnalysisPrompt>(),
    ]
}

pub fn prompt_names() -> Vec<&'static str> {
    vec![
        BasicGraphingAssistantPrompt::NAME,
        AdvancedMathAnalysisPrompt::NAME,
    ]
}
