//! Per-request session capability.
//!
//! Tools talk back to the calling client through a [`ToolSession`]: log
//! notifications, progress updates, LLM sampling and cancellation. Over STDIO
//! and TCP the session wraps the rmcp peer of the current request
//! ([`PeerSession`]); over HTTP there is no peer and tools get a
//! [`DetachedSession`].

use async_trait::async_trait;
use rmcp::{
    RoleServer,
    model::{
        Content, CreateMessageRequestParam, LoggingLevel, LoggingMessageNotificationParam,
        ProgressNotificationParam, ProgressToken, Role, SamplingMessage,
    },
    service::{Peer, RequestContext},
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Logger name attached to client log notifications.
const LOGGER: &str = "desmos-mcp";

/// Upper bound on tokens requested from the client's model.
const SAMPLING_MAX_TOKENS: u32 = 400;

/// Severity of a client-facing log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for LoggingLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LoggingLevel::Debug,
            LogLevel::Info => LoggingLevel::Info,
            LogLevel::Warning => LoggingLevel::Warning,
            LogLevel::Error => LoggingLevel::Error,
        }
    }
}

/// A single progress milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub step: u32,
    pub total: Option<u32>,
    pub message: Option<String>,
}

/// Errors returned by [`ToolSession::sample`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    /// No client is attached, or it did not advertise sampling.
    #[error("Sampling is not available for this session")]
    Unavailable,

    /// The client rejected or failed the request.
    #[error("Sampling request failed: {0}")]
    Request(String),

    /// The client answered without any text.
    #[error("Sampling returned an empty response")]
    EmptyResponse,
}

/// Capabilities a tool can use while handling one request.
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// Send a log message to the client. Also mirrored to `tracing`.
    async fn log(&self, level: LogLevel, message: &str);

    /// Report a progress milestone. Dropped when the client did not ask for
    /// progress.
    async fn progress(&self, update: ProgressUpdate);

    /// Ask the client's language model to complete `prompt`.
    async fn sample(&self, prompt: &str) -> Result<String, SamplingError>;

    /// Whether the client cancelled the request.
    fn is_cancelled(&self) -> bool;
}

fn mirror(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => debug!("{}", message),
        LogLevel::Info => info!("{}", message),
        LogLevel::Warning => warn!("{}", message),
        LogLevel::Error => error!("{}", message),
    }
}

/// Session bound to an rmcp request.
pub struct PeerSession {
    peer: Peer<RoleServer>,
    progress_token: Option<ProgressToken>,
    cancellation: CancellationToken,
}

impl PeerSession {
    pub fn from_request(context: &RequestContext<RoleServer>) -> Self {
        Self {
            peer: context.peer.clone(),
            progress_token: context.meta.get_progress_token(),
            cancellation: context.ct.clone(),
        }
    }

    fn supports_sampling(&self) -> bool {
        self.peer
            .peer_info()
            .map(|info| info.capabilities.sampling.is_some())
            .unwrap_or(false)
    }
}

#[async_trait]
impl ToolSession for PeerSession {
    async fn log(&self, level: LogLevel, message: &str) {
        mirror(level, message);

        let notification = LoggingMessageNotificationParam {
            level: level.into(),
            logger: Some(LOGGER.to_string()),
            data: serde_json::Value::String(message.to_string()),
        };
        if let Err(e) = self.peer.notify_logging_message(notification).await {
            debug!("Could not deliver log notification: {}", e);
        }
    }

    async fn progress(&self, update: ProgressUpdate) {
        let Some(token) = &self.progress_token else {
            return;
        };

        let notification = ProgressNotificationParam {
            progress_token: token.clone(),
            progress: f64::from(update.step),
            total: update.total.map(f64::from),
            message: update.message,
        };
        if let Err(e) = self.peer.notify_progress(notification).await {
            debug!("Could not deliver progress notification: {}", e);
        }
    }

    async fn sample(&self, prompt: &str) -> Result<String, SamplingError> {
        if !self.supports_sampling() {
            return Err(SamplingError::Unavailable);
        }

        let request = CreateMessageRequestParam {
            messages: vec![SamplingMessage {
                role: Role::User,
                content: Content::text(prompt),
            }],
            model_preferences: None,
            system_prompt: None,
            include_context: None,
            temperature: None,
            max_tokens: SAMPLING_MAX_TOKENS,
            stop_sequences: None,
            metadata: None,
        };

        let result = self
            .peer
            .create_message(request)
            .await
            .map_err(|e| SamplingError::Request(e.to_string()))?;

        result
            .message
            .content
            .as_text()
            .map(|text| text.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SamplingError::EmptyResponse)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

/// Session with no client attached.
///
/// Logs go to `tracing` only, progress is dropped and sampling is
/// unavailable.
#[derive(Debug, Clone, Default)]
pub struct DetachedSession {
    cancellation: CancellationToken,
}

impl DetachedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A detached session that observes `token` for cancellation.
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancellation: token,
        }
    }
}

#[async_trait]
impl ToolSession for DetachedSession {
    async fn log(&self, level: LogLevel, message: &str) {
        mirror(level, message);
    }

    async fn progress(&self, update: ProgressUpdate) {
        debug!(
            "Progress {}/{:?}: {}",
            update.step,
            update.total,
            update.message.unwrap_or_default()
        );
    }

    async fn sample(&self, _prompt: &str) -> Result<String, SamplingError> {
        Err(SamplingError::Unavailable)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
