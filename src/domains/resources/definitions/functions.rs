//! Supported functions resource definition.

use serde_json::{Map, Value};

use super::ResourceDefinition;
use crate::domains::formula::Function;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Functions the formula parser accepts, grouped by family.
pub struct FunctionsResource;

impl ResourceDefinition for FunctionsResource {
    const URI: &'static str = "resources://functions";
    const NAME: &'static str = "Supported Functions";
    const DESCRIPTION: &'static str = "Functions that may appear in formulas, grouped by family";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::SupportedFunctions)
    }
}

impl FunctionsResource {
    /// `{"<family>": ["<name>", ...], ...}`
    pub fn listing() -> Value {
        let mut families = Map::new();
        for function in Function::ALL {
            let names = families
                .entry(function.family())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(names) = names {
                names.push(Value::from(function.name()));
            }
        }
        Value::Object(families)
    }
}
