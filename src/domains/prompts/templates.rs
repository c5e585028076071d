//! Prompt templates module.
//!
//! A prompt is a short conversation. Each message is a template rendered
//! with the prompt's arguments using a small `{{variable}}` syntax:
//!
//! - `{{variable}}` is replaced with the value of `variable`
//! - `{{#if variable}}content{{/if}}` includes content only if variable is set
//! - `{{#if variable}}content{{else}}alternative{{/if}}` with else support

use rmcp::model::{PromptArgument, PromptMessage, PromptMessageRole};
use std::collections::HashMap;

use super::error::PromptError;

/// One message of a prompt, before rendering.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub role: PromptMessageRole,
    pub template: String,
}

impl MessageTemplate {
    pub fn user(template: impl Into<String>) -> Self {
        Self {
            role: PromptMessageRole::User,
            template: template.into(),
        }
    }

    pub fn assistant(template: impl Into<String>) -> Self {
        Self {
            role: PromptMessageRole::Assistant,
            template: template.into(),
        }
    }
}

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The messages of the conversation, in order.
    pub messages: Vec<MessageTemplate>,
}

impl PromptTemplate {
    /// Render every message with the given arguments.
    pub fn render(
        &self,
        arguments: &HashMap<String, String>,
    ) -> Result<Vec<PromptMessage>, PromptError> {
        self.messages
            .iter()
            .map(|message| {
                let text = render_text(&message.template, arguments)?;
                Ok(PromptMessage::new_text(message.role.clone(), text))
            })
            .collect()
    }
}

/// Render one template string.
pub fn render_text(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    // Conditionals first, so their bodies see substitutions
    let mut result = process_conditionals(template, arguments)?;

    for (key, value) in arguments {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    Ok(clean_unmatched_placeholders(&result))
}

/// Resolve `{{#if}}` blocks.
fn process_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut result = template.to_string();

    while let Some(if_start) = result.find("{{#if ") {
        let var_end = result[if_start..]
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let var_end = if_start + var_end;

        let var_name = result[if_start + 6..var_end].trim();

        let endif_tag = "{{/if}}";
        let endif_pos = result[var_end..]
            .find(endif_tag)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;
        let endif_pos = var_end + endif_pos;

        let block_content = &result[var_end + 2..endif_pos];
        let (true_content, false_content) = match block_content.find("{{else}}") {
            Some(else_pos) => (&block_content[..else_pos], &block_content[else_pos + 8..]),
            None => (block_content, ""),
        };

        // Set means present and non-empty
        let is_set = arguments
            .get(var_name)
            .is_some_and(|v| !v.trim().is_empty());
        let replacement = if is_set { true_content } else { false_content };

        result = format!(
            "{}{}{}",
            &result[..if_start],
            replacement,
            &result[endif_pos + endif_tag.len()..]
        );
    }

    Ok(result)
}

/// Remove placeholders of arguments that were not given.
fn clean_unmatched_placeholders(template: &str) -> String {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(pos) = result[start..].find("{{") {
        let abs_pos = start + pos;
        if let Some(end_pos) = result[abs_pos..].find("}}") {
            let end_abs = abs_pos + end_pos + 2;
            let placeholder = &result[abs_pos..end_abs];

            // Only remove simple placeholders, not special tags
            if !placeholder.contains('#') && !placeholder.contains('/') {
                result = format!("{}{}", &result[..abs_pos], &result[end_abs..]);
                continue;
            }
        }
        start = abs_pos + 2;
    }

    result
}
