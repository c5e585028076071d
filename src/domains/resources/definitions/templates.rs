//! Graph style templates resource definition.

use serde::Serialize;
use serde_json::{Map, Value};

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Colors of a graph style.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphTemplate {
    pub background_color: &'static str,
    pub axes_color: &'static str,
    pub grid_color: &'static str,
}

const TEMPLATES: [(&str, GraphTemplate); 2] = [
    (
        "dark_mode",
        GraphTemplate {
            background_color: "#333",
            axes_color: "#FFF",
            grid_color: "#555",
        },
    ),
    (
        "presentation",
        GraphTemplate {
            background_color: "#FFF",
            axes_color: "#000",
            grid_color: "#DDD",
        },
    ),
];

/// Named graph style templates.
pub struct TemplatesResource;

impl ResourceDefinition for TemplatesResource {
    const URI: &'static str = "resources://templates";
    const NAME: &'static str = "Graph Templates";
    const DESCRIPTION: &'static str = "Named color schemes for graphs";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::GraphTemplates)
    }
}

impl TemplatesResource {
    pub fn listing() -> Result<Value, serde_json::Error> {
        let mut templates = Map::new();
        for (name, template) in &TEMPLATES {
            templates.insert(name.to_string(), serde_json::to_value(template)?);
        }
        Ok(Value::Object(templates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing() {
        let listing = TemplatesResource::listing().unwrap();
        assert_eq!(listing["dark_mode"]["backgroundColor"], "#333");
        assert_eq!(listing["presentation"]["gridColor"], "#DDD");
    }
}
