//! One file per resource.

pub mod examples;
pub mod functions;
pub mod info;
pub mod templates;

pub use examples::ExamplesResource;
pub use functions::FunctionsResource;
pub use info::InfoResource;
pub use templates::{GraphTemplate, TemplatesResource};

use super::service::ResourceContent;

/// Metadata and content of a `resources://` document.
pub trait ResourceDefinition {
    /// `resources://<name>`
    const URI: &'static str;
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const MIME_TYPE: &'static str;

    /// Fixed text, or a marker for content generated at read time.
    fn content() -> ResourceContent;
}
