//! The `resources://` documents this server serves.

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{
    ExamplesResource, FunctionsResource, InfoResource, ResourceDefinition, TemplatesResource,
};
use super::service::ResourceEntry;

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<InfoResource>(),
        build_resource::<FunctionsResource>(),
        build_resource::<TemplatesResource>(),
        build_resource::<ExamplesResource>(),
    ]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        InfoResource::URI,
        FunctionsResource::URI,
        TemplatesResource::URI,
        ExamplesResource::URI,
    ]
}
