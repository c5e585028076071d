//! Basic graphing assistant prompt definition.

use super::PromptDefinition;
use crate::domains::prompts::templates::MessageTemplate;
use rmcp::model::PromptArgument;

/// Opens a conversation about plotting a simple function.
pub struct BasicGraphingAssistantPrompt;

impl PromptDefinition for BasicGraphingAssistantPrompt {
    const NAME: &'static str = "basic_graphing_assistant";
    const DESCRIPTION: &'static str = "Assist user with plotting basic math functions.";

    fn messages() -> Vec<MessageTemplate> {
        vec![MessageTemplate::user("I need help plotting a simple function.")]
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![]
    }
}
