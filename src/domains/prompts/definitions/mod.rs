//! One file per prompt.

pub mod advanced_analysis;
pub mod basic_graphing;

pub use advanced_analysis::AdvancedMathAnalysisPrompt;
pub use basic_graphing::BasicGraphingAssistantPrompt;

use rmcp::model::PromptArgument;

use super::templates::MessageTemplate;

/// A named conversation template.
pub trait PromptDefinition {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// The conversation, with {{variable}} placeholders.
    fn messages() -> Vec<MessageTemplate>;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}
