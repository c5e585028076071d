//! Configuration management for the MCP server.
//!
//! Values come from defaults overridden by `MCP_*` environment variables
//! (a `.env` file is loaded first when present).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default base URL of the Desmos API.
pub const DEFAULT_DESMOS_API_URL: &str = "https://www.desmos.com/api/v1.11";

/// Default timeout for a single Desmos API call, in seconds.
pub const DEFAULT_DESMOS_TIMEOUT_SECS: u64 = 15;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote plotting service.
    pub desmos: DesmosConfig,

    /// Where rendered plots are saved.
    pub plots: PlotOutputConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the Desmos API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct DesmosConfig {
    /// Bearer token. Without it the remote renderer is unavailable.
    pub api_key: Option<String>,

    /// Base URL; plots are requested from `<api_url>/plot`.
    pub api_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DesmosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesmosConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DesmosConfig {
    /// Whether a non-empty key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for DesmosConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_DESMOS_API_URL.to_string(),
            timeout_secs: DEFAULT_DESMOS_TIMEOUT_SECS,
        }
    }
}

/// Persistence of rendered plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotOutputConfig {
    /// Directory that receives `plot_*.png` and `multi_plot_*.png` files.
    pub output_dir: PathBuf,

    /// Whether plots are saved at all.
    pub persist: bool,
}

/// `~/Desktop/Desmos-MCP`, or a temp directory when no home is known.
fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(std::env::temp_dir)
        .join("Desmos-MCP")
}

impl Default for PlotOutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            persist: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "desmos-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            desmos: DesmosConfig::default(),
            plots: PlotOutputConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`. The Desmos key is
    /// also read from `DESMOS_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Desmos API
        let api_key = std::env::var("MCP_DESMOS_API_KEY")
            .or_else(|_| std::env::var("DESMOS_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_some() {
            info!("Desmos API key loaded from environment");
        } else {
            warn!("No Desmos API key set (MCP_DESMOS_API_KEY) - plots will be rendered locally");
        }
        config.desmos.api_key = api_key;

        if let Ok(url) = std::env::var("MCP_DESMOS_API_URL") {
            config.desmos.api_url = url;
        }

        if let Ok(timeout) = std::env::var("MCP_DESMOS_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.desmos.timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid MCP_DESMOS_TIMEOUT_SECS '{}', using {}",
                    timeout, DEFAULT_DESMOS_TIMEOUT_SECS
                ),
            }
        }

        // Plot persistence
        if let Ok(dir) = std::env::var("MCP_PLOT_OUTPUT_DIR") {
            config.plots.output_dir = PathBuf::from(dir);
        }

        if let Ok(persist) = std::env::var("MCP_PLOT_PERSIST") {
            config.plots.persist = persist.parse().unwrap_or(true);
        }
        info!(
            "Plot persistence: {} ({})",
            config.plots.persist,
            config.plots.output_dir.display()
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_desmos_env() {
        unsafe {
            std::env::remove_var("MCP_DESMOS_API_KEY");
            std::env::remove_var("DESMOS_API_KEY");
            std::env::remove_var("MCP_DESMOS_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_desmos_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_desmos_env();
        unsafe {
            std::env::set_var("MCP_DESMOS_API_KEY", "test_key_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.desmos.api_key.as_deref(), Some("test_key_12345"));
        assert!(config.desmos.has_api_key());
        clear_desmos_env();
    }

    #[test]
    fn test_desmos_key_legacy_name() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_desmos_env();
        unsafe {
            std::env::set_var("DESMOS_API_KEY", "legacy");
        }
        let config = Config::from_env();
        assert_eq!(config.desmos.api_key.as_deref(), Some("legacy"));
        clear_desmos_env();
    }

    #[test]
    fn test_empty_key_means_no_remote() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_desmos_env();
        unsafe {
            std::env::set_var("MCP_DESMOS_API_KEY", "  ");
        }
        let config = Config::from_env();
        assert!(config.desmos.api_key.is_none());
        clear_desmos_env();
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_desmos_env();
        unsafe {
            std::env::set_var("MCP_DESMOS_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.desmos.timeout_secs, DEFAULT_DESMOS_TIMEOUT_SECS);
        clear_desmos_env();
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let desmos = DesmosConfig {
            api_key: Some("super_secret_key".to_string()),
            ..DesmosConfig::default()
        };
        let debug_str = format!("{:?}", desmos);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.desmos.has_api_key());
        assert_eq!(config.desmos.api_url, DEFAULT_DESMOS_API_URL);
        assert_eq!(config.desmos.timeout_secs, 15);
        assert!(config.plots.persist);
        assert!(config.plots.output_dir.ends_with("Desmos-MCP"));
    }
}
