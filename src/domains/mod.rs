//! Domains module containing business logic organized by bounded contexts.
//!
//! - `formula` - parsing and symbolic analysis of formulas
//! - `plotting` - remote and local rendering of plots
//! - `validation` - syntax checks with plain-language explanations
//! - `tools`, `resources`, `prompts` - the MCP surface built on top

pub mod formula;
pub mod plotting;
pub mod prompts;
pub mod resources;
pub mod tools;
pub mod validation;
