//! Server info resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Basic server information.
pub struct InfoResource;

impl ResourceDefinition for InfoResource {
    const URI: &'static str = "resources://info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Basic information about this server";
    const MIME_TYPE: &'static str = "text/plain";

    fn content() -> ResourceContent {
        ResourceContent::Text("This is the Desmos-MCP server.".to_string())
    }
}
