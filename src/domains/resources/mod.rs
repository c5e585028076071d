//! Read-only documents under `resources://`.
//!
//! `info` and `examples` are fixed text. `functions` and `templates` are JSON
//! listings generated when read, so they always match what the formula
//! engine and renderer support.

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
