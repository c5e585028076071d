//! Shared dependencies handed to every tool.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::domains::plotting::{
    DesmosClient, FsPlotStore, PlotOrchestrator, PlottersRenderer, RemoteError,
};

/// Dependencies shared by the tool handlers.
///
/// Built once from [`Config`] and shared behind an `Arc` by every transport.
#[derive(Clone)]
pub struct ToolServices {
    plots: PlotOrchestrator,
}

impl ToolServices {
    /// Wrap an already assembled orchestrator.
    pub fn new(plots: PlotOrchestrator) -> Self {
        Self { plots }
    }

    /// Build the renderers and plot store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut plots = PlotOrchestrator::new(Arc::new(PlottersRenderer::new()));

        let timeout = Duration::from_secs(config.desmos.timeout_secs);
        match DesmosClient::new(
            config.desmos.api_key.as_deref(),
            &config.desmos.api_url,
            timeout,
        ) {
            Ok(client) => {
                info!("Desmos renderer enabled at {}", client.endpoint());
                plots = plots.with_remote(Arc::new(client));
            }
            Err(RemoteError::MissingCredential) => {
                warn!("Desmos renderer unavailable: no API key configured");
            }
            Err(e) => return Err(Error::Remote(e)),
        }

        if config.plots.persist {
            plots = plots.with_store(Arc::new(FsPlotStore::new(config.plots.output_dir.clone())));
        }

        Ok(Self { plots })
    }

    pub fn plots(&self) -> &PlotOrchestrator {
        &self.plots
    }
}

/// Services backed by in-memory renderers, for tool tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::ToolServices;
    use crate::domains::plotting::{
        LocalRenderer, PlotOrchestrator, PlotRange, RemoteRenderer, RenderError, RenderRequest,
    };

    /// Writes the series labels as the "image".
    pub struct LabelRenderer;

    impl LocalRenderer for LabelRenderer {
        fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
            let labels: Vec<&str> = request.series.iter().map(|s| s.label.as_str()).collect();
            Ok(labels.join("|").into_bytes())
        }
    }

    /// A remote service that is always down.
    pub struct DownRemote;

    #[async_trait]
    impl RemoteRenderer for DownRemote {
        async fn render(&self, _: &str, _: PlotRange, _: Option<PlotRange>) -> Option<Vec<u8>> {
            None
        }
    }

    /// A remote service that always answers with `bytes`.
    pub struct FixedRemote(pub Vec<u8>);

    #[async_trait]
    impl RemoteRenderer for FixedRemote {
        async fn render(&self, _: &str, _: PlotRange, _: Option<PlotRange>) -> Option<Vec<u8>> {
            Some(self.0.clone())
        }
    }

    pub fn local_only() -> Arc<ToolServices> {
        Arc::new(ToolServices::new(PlotOrchestrator::new(Arc::new(
            LabelRenderer,
        ))))
    }

    pub fn with_remote(remote: impl RemoteRenderer + 'static) -> Arc<ToolServices> {
        Arc::new(ToolServices::new(
            PlotOrchestrator::new(Arc::new(LabelRenderer)).with_remote(Arc::new(remote)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_means_local_only() {
        let services = ToolServices::from_config(&Config::default()).unwrap();
        assert!(!services.plots().has_remote());
    }

    #[test]
    fn test_key_enables_remote() {
        let mut config = Config::default();
        config.desmos.api_key = Some("key".to_string());
        let services = ToolServices::from_config(&config).unwrap();
        assert!(services.plots().has_remote());
    }
}
