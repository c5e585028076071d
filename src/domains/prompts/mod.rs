//! Canned conversations a client can start from.
//!
//! Messages are `{{name}}` templates with `{{#if name}}...{{else}}...{{/if}}`
//! blocks, rendered by [`templates`] against the client's arguments.

pub mod definitions;
mod error;
mod registry;
mod service;
pub mod templates;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{get_all_prompts, prompt_names};
pub use service::PromptService;
pub use templates::{MessageTemplate, PromptTemplate};
