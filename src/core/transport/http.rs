//! HTTP transport: JSON-RPC over POST.
//!
//! There is no client peer on this path, so tool calls cannot sample or send
//! notifications. They still observe cancellation: Ctrl-C stops the server
//! and cancels every in-flight call.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportConfig, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// Protocol version reported by `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 error codes, plus the MCP code for unknown resources.
mod codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const RESOURCE_NOT_FOUND: i32 = -32002;
}

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_PARAMS, message)
    }
}

impl JsonRpcResponse {
    fn from_outcome(id: Option<Value>, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
            error,
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    /// Set by `initialize`; there is one logical session per server.
    session: Arc<RwLock<Option<SessionState>>>,
    /// Cancelled on shutdown; every tool call observes a child token.
    shutdown: CancellationToken,
    rpc_path: String,
}

impl AppState {
    fn new(server: McpServer, rpc_path: impl Into<String>) -> Self {
        Self {
            server,
            session: Arc::new(RwLock::new(None)),
            shutdown: CancellationToken::new(),
            rpc_path: rpc_path.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct SessionState {
    initialized: bool,
    protocol_version: String,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Returns `None` unless `config` selects HTTP.
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Http(http) => Some(Self::new(http.clone())),
            _ => None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until Ctrl-C, then cancel in-flight tool calls and drain.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let state = AppState::new(server, self.config.rpc_path.clone());
        let shutdown = state.shutdown.clone();

        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - POST {}{} (JSON-RPC over HTTP, CORS {}), GET /health",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
                info!("Shutdown requested, cancelling in-flight tool calls");
                shutdown.cancel();
            })
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "tools": state.server.list_tools().len(),
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    tracing::Span::current().record("method", request.method.as_str());
    Json(process_request(&state, request).await)
}

async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        let error = JsonRpcError::new(codes::INVALID_REQUEST, "Invalid Request");
        return JsonRpcResponse::from_outcome(request.id, Err(error));
    }

    debug!("JSON-RPC request: {}", request.method);
    let params = request.params.unwrap_or(Value::Null);
    let outcome = match request.method.as_str() {
        "initialize" => Ok(initialize(state).await),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => Ok(serde_json::json!({ "tools": state.server.list_tools() })),
        "tools/call" => call_tool(state, &params).await,
        "resources/list" => {
            Ok(serde_json::json!({ "resources": state.server.list_resources().await }))
        }
        "resources/read" => read_resource(state, &params).await,
        "prompts/list" => {
            Ok(serde_json::json!({ "prompts": state.server.list_prompts().await }))
        }
        "prompts/get" => get_prompt(state, &params).await,
        "logging/setLevel" => set_level(&params),

        // Stateless HTTP has nothing to send back for a notification
        method if method.starts_with("notifications/") => {
            on_notification(state, method).await;
            Ok(Value::Null)
        }

        method => {
            warn!("Unknown method: {}", method);
            Err(JsonRpcError::new(codes::METHOD_NOT_FOUND, "Method not found"))
        }
    };

    JsonRpcResponse::from_outcome(request.id, outcome)
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, JsonRpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Missing '{}'", key)))
}

async fn initialize(state: &AppState) -> Value {
    // Not ready until the client sends notifications/initialized
    *state.session.write().await = Some(SessionState {
        initialized: false,
        protocol_version: PROTOCOL_VERSION.to_string(),
    });

    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {},
            "logging": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": INSTRUCTIONS
    })
}

async fn call_tool(state: &AppState, params: &Value) -> Result<Value, JsonRpcError> {
    let name = required_str(params, "name")?;
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    info!("HTTP tool call: {}", name);
    state
        .server
        .call_tool(name, arguments, state.shutdown.child_token())
        .await
        .map_err(JsonRpcError::invalid_params)
}

async fn read_resource(state: &AppState, params: &Value) -> Result<Value, JsonRpcError> {
    let uri = required_str(params, "uri")?;
    state
        .server
        .read_resource(uri)
        .await
        .map_err(|e| JsonRpcError::new(codes::RESOURCE_NOT_FOUND, e))
}

async fn get_prompt(state: &AppState, params: &Value) -> Result<Value, JsonRpcError> {
    let name = required_str(params, "name")?;
    state
        .server
        .get_prompt(name, params.get("arguments").cloned())
        .await
        .map_err(JsonRpcError::invalid_params)
}

/// Logs never reach an HTTP client, so the level is only recorded.
fn set_level(params: &Value) -> Result<Value, JsonRpcError> {
    let level = required_str(params, "level")?;
    info!("Client requested log level {}", level);
    Ok(serde_json::json!({}))
}

async fn on_notification(state: &AppState, method: &str) {
    if method != "notifications/initialized" {
        debug!("Ignoring notification: {}", method);
        return;
    }
    if let Some(session) = state.session.write().await.as_mut() {
        session.initialized = true;
        info!("Session ready (protocol {})", session.protocol_version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::services::testing::local_only;

    fn test_state() -> AppState {
        AppState::new(
            McpServer::with_services(Config::default(), local_only()),
            "/mcp",
        )
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(serde_json::json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_then_initialized() {
        let state = test_state();
        let response = process_request(&state, request("initialize", serde_json::json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["instructions"], INSTRUCTIONS);
        assert!(result["capabilities"]["logging"].is_object());
        assert!(!state.session.read().await.as_ref().unwrap().initialized);

        process_request(&state, request("notifications/initialized", serde_json::json!({}))).await;
        assert!(state.session.read().await.as_ref().unwrap().initialized);
    }

    #[tokio::test]
    async fn test_tools_list_and_call() {
        let state = test_state();
        let listed = process_request(&state, request("tools/list", serde_json::json!({}))).await;
        assert_eq!(listed.result.unwrap()["tools"].as_array().map(|t| t.len()), Some(5));

        let response = process_request(
            &state,
            request(
                "tools/call",
                serde_json::json!({ "name": "hello", "arguments": { "name": "Ada" } }),
            ),
        )
        .await;
        assert_eq!(response.result.unwrap()["content"][0]["text"], "Hello, Ada!");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let state = test_state();
        let response = process_request(
            &state,
            request("tools/call", serde_json::json!({ "name": "nope" })),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, codes::INVALID_PARAMS);
        assert_eq!(error.message, "Tool not found: nope");
    }

    #[tokio::test]
    async fn test_cancelled_plot_after_shutdown() {
        let state = test_state();
        state.shutdown.cancel();
        let response = process_request(
            &state,
            request(
                "tools/call",
                serde_json::json!({
                    "name": "plot_math_function",
                    "arguments": { "formula": "x", "use_api": false }
                }),
            ),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("cancelled"));
    }

    #[tokio::test]
    async fn test_resources_read_and_missing() {
        let state = test_state();
        let read = process_request(
            &state,
            request("resources/read", serde_json::json!({ "uri": "resources://info" })),
        )
        .await;
        assert_eq!(
            read.result.unwrap()["contents"][0]["text"],
            "This is the Desmos-MCP server."
        );

        let missing = process_request(
            &state,
            request("resources/read", serde_json::json!({ "uri": "resources://nope" })),
        )
        .await;
        assert_eq!(missing.error.unwrap().code, codes::RESOURCE_NOT_FOUND);

        let no_uri = process_request(&state, request("resources/read", Value::Null)).await;
        assert_eq!(no_uri.error.unwrap().message, "Missing 'uri'");
    }

    #[tokio::test]
    async fn test_rejects_wrong_version_and_unknown_method() {
        let state = test_state();
        let mut bad = request("tools/list", serde_json::json!({}));
        bad.jsonrpc = "1.0".to_string();
        assert_eq!(
            process_request(&state, bad).await.error.unwrap().code,
            codes::INVALID_REQUEST
        );

        let unknown = request("resources/templates/list", serde_json::json!({}));
        assert_eq!(
            process_request(&state, unknown).await.error.unwrap().code,
            codes::METHOD_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_set_level_requires_level() {
        let state = test_state();
        let ok = request("logging/setLevel", serde_json::json!({ "level": "debug" }));
        assert!(process_request(&state, ok).await.error.is_none());

        let missing = request("logging/setLevel", serde_json::json!({}));
        assert_eq!(
            process_request(&state, missing).await.error.unwrap().code,
            codes::INVALID_PARAMS
        );
    }
}
