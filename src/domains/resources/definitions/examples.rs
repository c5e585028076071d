//! Example formulas resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

const EXAMPLE_FORMULAS: &str = "\
# Basic Examples
y = x^2
y = sin(x)

# Advanced Examples
y = exp(-x^2) * sin(pi*x)
";

/// Formulas to try with the plotting tools.
pub struct ExamplesResource;

impl ResourceDefinition for ExamplesResource {
    const URI: &'static str = "resources://examples";
    const NAME: &'static str = "Example Formulas";
    const DESCRIPTION: &'static str = "Basic and advanced formulas to plot";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(EXAMPLE_FORMULAS.to_string())
    }
}
