//! Plot orchestration.
//!
//! A single-formula plot runs this state machine:
//!
//! ```text
//! Start ── use_api && remote? ──> RemoteAttempt ── image ──> Encode ──> Done
//!   │                                 │
//!   │                                 └── no image / task failure
//!   v                                 v
//! LocalRender: parse ──> render ──> persist ──> Encode ──> Done
//!                │          │
//!                └──────────┴──> Failed
//! ```
//!
//! Multi-formula plots skip the remote step and fail as a whole when any
//! formula fails. Every path closes its progress reporter exactly once, and
//! cancellation is checked before each suspension point.

use std::sync::Arc;

use tracing::{error, info};

use crate::core::session::{LogLevel, ToolSession};
use crate::domains::formula::{Formula, RealFunction};

use super::data_uri::encode_data_uri;
use super::error::RenderError;
use super::local::LocalRenderer;
use super::progress::ProgressReporter;
use super::range::PlotRange;
use super::remote::RemoteRenderer;
use super::series::{PlotSeries, PlotStyle, RenderRequest};
use super::storage::{PlotStore, persist};

/// Result of one render attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Success(Vec<u8>),
    RemoteFailure(String),
    LocalFailure(String),
}

/// Final text of a plot request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    /// Status text with the embedded data URI.
    Done(String),
    Failed(String),
}

impl PlotOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Done(text) | Self::Failed(text) => text,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A single-formula plot request.
#[derive(Debug, Clone, PartialEq)]
pub struct SinglePlot {
    pub formula: String,
    pub x_range: PlotRange,
    pub y_range: Option<PlotRange>,
    pub use_api: bool,
}

/// Sequences remote and local rendering for plot requests.
#[derive(Clone)]
pub struct PlotOrchestrator {
    remote: Option<Arc<dyn RemoteRenderer>>,
    local: Arc<dyn LocalRenderer>,
    store: Option<Arc<dyn PlotStore>>,
}

/// Parse `text` and compile it as a function of the plotting variable.
fn compile_univariate(text: &str) -> Result<RealFunction, RenderError> {
    Ok(Formula::parse(text)?.function()?)
}

/// `<status>[ <persistence notice>] Image: <uri>`
fn success_text(status: String, notice: Option<String>, bytes: &[u8]) -> String {
    let mut text = status;
    if let Some(notice) = notice {
        text.push(' ');
        text.push_str(&notice);
    }
    text.push_str(" Image: ");
    text.push_str(&encode_data_uri(bytes));
    text
}

impl PlotOrchestrator {
    pub fn new(local: Arc<dyn LocalRenderer>) -> Self {
        Self {
            remote: None,
            local,
            store: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteRenderer>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn PlotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Plot one formula, trying the remote renderer first when asked to.
    pub async fn plot_single(&self, session: &dyn ToolSession, request: &SinglePlot) -> PlotOutcome {
        let mut progress = ProgressReporter::start(session, None, "Initializing plot...").await;
        let outcome = self.run_single(session, &mut progress, request).await;
        progress.close(closing_message(&outcome)).await;
        outcome
    }

    /// Plot several formulas on one frame, in input order.
    pub async fn plot_multiple(
        &self,
        session: &dyn ToolSession,
        formulas: &[String],
        x_range: PlotRange,
        y_range: Option<PlotRange>,
    ) -> PlotOutcome {
        if formulas.is_empty() {
            return PlotOutcome::Failed(
                "Error plotting multiple functions. Details: no formulas were given.".to_string(),
            );
        }

        let total = formulas.len() as u32 + 1;
        let mut progress =
            ProgressReporter::start(session, Some(total), "Starting multi-plot...").await;
        let outcome = self
            .run_multiple(session, &mut progress, formulas, x_range, y_range)
            .await;
        progress.close(closing_message(&outcome)).await;
        outcome
    }

    async fn run_single(
        &self,
        session: &dyn ToolSession,
        progress: &mut ProgressReporter<'_>,
        request: &SinglePlot,
    ) -> PlotOutcome {
        let formula = request.formula.as_str();

        if let (true, Some(remote)) = (request.use_api, &self.remote) {
            if session.is_cancelled() {
                return cancelled(formula);
            }
            session
                .log(LogLevel::Info, "Attempting to plot with Desmos API...")
                .await;
            progress.set_total(2);
            progress.report(1, "Calling Desmos API...").await;

            match self.attempt_remote(session, remote, request).await {
                RenderOutcome::Success(bytes) => {
                    progress.report(2, "Encoding image...").await;
                    let status = format!("Successfully plotted '{}' using Desmos API.", formula);
                    return PlotOutcome::Done(success_text(status, None, &bytes));
                }
                outcome => info!("Remote render did not succeed: {:?}", outcome),
            }
        }

        session.log(LogLevel::Info, "Using local rendering...").await;
        progress.restart(3, "Starting local rendering...").await;

        let bytes = match self.render_single_locally(session, progress, request).await {
            RenderOutcome::Success(bytes) => bytes,
            RenderOutcome::LocalFailure(message) | RenderOutcome::RemoteFailure(message) => {
                session.log(LogLevel::Error, &message).await;
                return PlotOutcome::Failed(message);
            }
        };

        if session.is_cancelled() {
            return cancelled(formula);
        }
        let persistence = persist(self.store.as_deref(), "plot", &bytes).await;

        progress.report(3, "Encoding image...").await;
        let status = format!("Successfully plotted '{}' using local rendering.", formula);
        PlotOutcome::Done(success_text(status, persistence.notice(), &bytes))
    }

    /// One remote attempt on its own task, so a panicking client cannot take
    /// the request down with it.
    async fn attempt_remote(
        &self,
        session: &dyn ToolSession,
        remote: &Arc<dyn RemoteRenderer>,
        request: &SinglePlot,
    ) -> RenderOutcome {
        let remote = Arc::clone(remote);
        let formula = request.formula.clone();
        let (x_range, y_range) = (request.x_range, request.y_range);
        let task = tokio::spawn(async move { remote.render(&formula, x_range, y_range).await });

        match task.await {
            Ok(Some(bytes)) => RenderOutcome::Success(bytes),
            Ok(None) => {
                session
                    .log(
                        LogLevel::Warning,
                        "Desmos API call failed, falling back to local rendering.",
                    )
                    .await;
                RenderOutcome::RemoteFailure("no image returned".to_string())
            }
            Err(e) => {
                let message = format!(
                    "An exception occurred with Desmos API: {}. Falling back to local rendering.",
                    e
                );
                session.log(LogLevel::Error, &message).await;
                RenderOutcome::RemoteFailure(e.to_string())
            }
        }
    }

    async fn render_single_locally(
        &self,
        session: &dyn ToolSession,
        progress: &mut ProgressReporter<'_>,
        request: &SinglePlot,
    ) -> RenderOutcome {
        let formula = request.formula.as_str();
        let failure = |e: RenderError| {
            RenderOutcome::LocalFailure(format!(
                "Error plotting formula '{}' locally. Details: {}",
                formula, e
            ))
        };

        progress.report(1, "Parsing formula...").await;
        let parsed = match compile_univariate(formula) {
            Ok(parsed) => parsed,
            Err(e) => return failure(e),
        };

        if session.is_cancelled() {
            return RenderOutcome::LocalFailure(cancelled(formula).text().to_string());
        }
        progress.report(2, "Generating plot data...").await;
        let render = RenderRequest {
            series: vec![PlotSeries::new(parsed, formula, 0)],
            x_range: request.x_range,
            y_range: request.y_range,
            style: PlotStyle::single(formula),
        };
        match self.render_locally(render).await {
            Ok(bytes) => RenderOutcome::Success(bytes),
            Err(e) => failure(e),
        }
    }

    async fn run_multiple(
        &self,
        session: &dyn ToolSession,
        progress: &mut ProgressReporter<'_>,
        formulas: &[String],
        x_range: PlotRange,
        y_range: Option<PlotRange>,
    ) -> PlotOutcome {
        let mut series = Vec::with_capacity(formulas.len());
        for (i, formula) in formulas.iter().enumerate() {
            if session.is_cancelled() {
                return PlotOutcome::Failed("Multi-plot was cancelled.".to_string());
            }
            progress
                .report(i as u32 + 1, &format!("Processing formula {}: {}", i + 1, formula))
                .await;

            match compile_univariate(formula) {
                Ok(parsed) => series.push(PlotSeries::new(parsed, formula.as_str(), i)),
                Err(e) => {
                    let message = format!(
                        "Error plotting multiple functions. Formula {} ('{}') failed: {}",
                        i + 1,
                        formula,
                        e
                    );
                    session.log(LogLevel::Error, &message).await;
                    return PlotOutcome::Failed(message);
                }
            }
        }

        if session.is_cancelled() {
            return PlotOutcome::Failed("Multi-plot was cancelled.".to_string());
        }
        let request = RenderRequest {
            series,
            x_range,
            y_range,
            style: PlotStyle::multiple(),
        };
        let bytes = match self.render_locally(request).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = format!("Error plotting multiple functions. Details: {}", e);
                session.log(LogLevel::Error, &message).await;
                return PlotOutcome::Failed(message);
            }
        };

        let persistence = persist(self.store.as_deref(), "multi_plot", &bytes).await;

        progress.report(formulas.len() as u32 + 1, "Encoding image...").await;
        let status = format!("Successfully plotted {} functions.", formulas.len());
        PlotOutcome::Done(success_text(status, persistence.notice(), &bytes))
    }

    /// Run the local renderer on a blocking worker.
    async fn render_locally(&self, request: RenderRequest) -> Result<Vec<u8>, RenderError> {
        let local = Arc::clone(&self.local);
        tokio::task::spawn_blocking(move || local.render(&request))
            .await
            .map_err(|e| {
                error!("Render worker failed: {}", e);
                RenderError::Task(e.to_string())
            })?
    }
}

fn cancelled(formula: &str) -> PlotOutcome {
    PlotOutcome::Failed(format!("Plotting '{}' was cancelled.", formula))
}

fn closing_message(outcome: &PlotOutcome) -> &'static str {
    match outcome {
        PlotOutcome::Done(_) => "Done.",
        PlotOutcome::Failed(_) => "Failed.",
    }
}
