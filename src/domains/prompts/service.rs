//! Prompt service implementation.
//!
//! The PromptService manages prompt templates and their instantiation.
//! It maintains a registry of available prompts and handles argument substitution.
//!
//! Prompts are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new prompt does NOT require modifying this file.

use rmcp::model::{GetPromptResult, Prompt};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registry of available prompts.
    /// Key: prompt name, Value: prompt template
    prompts: HashMap<String, PromptTemplate>,
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptService {
    /// Create a new PromptService with every registered prompt.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: HashMap::new(),
        };
        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts, ordered by name.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        let mut prompts: Vec<Prompt> = self
            .prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect();
        prompts.sort_by(|a, b| a.name.cmp(&b.name));
        prompts
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        // Validate required arguments
        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: template.render(&arguments)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;

    fn texts(result: &GetPromptResult) -> Vec<String> {
        result
            .messages
            .iter()
            .map(|m| match &m.content {
                PromptMessageContent::Text { text } => text.clone(),
                _ => panic!("Expected text content"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_list_prompts() {
        let service = PromptService::new();
        let prompts = service.list_prompts().await;
        let names: Vec<_> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["advanced_math_analysis", "basic_graphing_assistant"]);
    }

    #[tokio::test]
    async fn test_basic_prompt() {
        let service = PromptService::new();
        let result = service
            .get_prompt("basic_graphing_assistant", None)
            .await
            .unwrap();
        assert_eq!(texts(&result), vec!["I need help plotting a simple function."]);
    }

    #[tokio::test]
    async fn test_advanced_prompt_default_focus() {
        let service = PromptService::new();
        let result = service
            .get_prompt("advanced_math_analysis", None)
            .await
            .unwrap();
        assert_eq!(
            texts(&result),
            vec![
                "I want to perform an advanced analysis on a function, focusing on derivatives.",
                "Of course. Please provide the function you'd like to analyze.",
            ]
        );
    }

    #[tokio::test]
    async fn test_advanced_prompt_with_focus() {
        let service = PromptService::new();
        let mut args = HashMap::new();
        args.insert("analysis_focus".to_string(), "limits".to_string());

        let result = service
            .get_prompt("advanced_math_analysis", Some(args))
            .await
            .unwrap();
        assert!(texts(&result)[0].ends_with("focusing on limits."));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = PromptService::new();
        let result = service.get_prompt("nonexistent", None).await;
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }
}
