//! Formula validation with natural-language explanations of syntax errors.

pub mod explain;
pub mod pipeline;

pub use explain::{explain, explanation_prompt};
pub use pipeline::{ValidationResult, validate};
