//! The rmcp [`ServerHandler`].
//!
//! Tool calls are routed by the [`ToolRouter`] built in
//! `domains/tools/router.rs`; each call gets a
//! [`PeerSession`](super::session::PeerSession) for logging, progress and
//! sampling. Resources and prompts delegate to their domain services.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "http")]
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    prompts::PromptService,
    resources::ResourceService,
    tools::{ToolServices, build_tool_router},
};

#[cfg(feature = "http")]
use super::session::DetachedSession;
#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to clients on initialization.
pub const INSTRUCTIONS: &str = "Visualize and analyze math formulas in x. \
Use validate_formula to check syntax, analyze_formula for domain, range, derivative \
and critical points, and plot_math_function or plot_multiple_functions to get a PNG \
plot as a data URI.";

/// Cheap to clone: TCP serves every connection from a clone.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    /// Renderers and plot store shared by all tool calls.
    services: Arc<ToolServices>,
    resource_service: Arc<ResourceService>,
    prompt_service: Arc<PromptService>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Fails when the remote render client cannot be built.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let services = Arc::new(ToolServices::from_config(&config)?);
        Ok(Self::with_services(config, services))
    }

    /// Use prebuilt services, e.g. fakes in tests.
    pub fn with_services(config: Config, services: Arc<ToolServices>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(services.clone()),
            config: Arc::new(config),
            services,
            resource_service: Arc::new(ResourceService::new()),
            prompt_service: Arc::new(PromptService::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // HTTP transport helpers. These mirror the `ServerHandler` methods below
    // and return the same rmcp models, serialized.

    /// Tool descriptors as `tools/list` returns them.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .filter_map(|tool| serde_json::to_value(tool).ok())
            .collect()
    }

    /// Run a tool with a detached session observing `cancellation`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        cancellation: CancellationToken,
    ) -> Result<serde_json::Value, String> {
        let session = DetachedSession::with_cancellation(cancellation);
        ToolRegistry::new(self.services.clone())
            .call_tool(name, arguments, &session)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resources()
            .await
            .into_iter()
            .filter_map(|resource| serde_json::to_value(resource).ok())
            .collect()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        let result = self
            .resource_service
            .read_resource(uri)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }

    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        self.prompt_service
            .list_prompts()
            .await
            .into_iter()
            .filter_map(|prompt| serde_json::to_value(prompt).ok())
            .collect()
    }

    /// Render a prompt. Non-string argument values are ignored.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, String> {
        let result = self
            .prompt_service
            .get_prompt(name, arguments.as_ref().and_then(string_arguments))
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }
}

fn string_arguments(value: &serde_json::Value) -> Option<HashMap<String, String>> {
    value.as_object().map(|object| {
        object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()
    })
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .enable_logging()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), McpError> {
        info!("Client requested log level {:?}", request.level);
        Ok(())
    }
}
