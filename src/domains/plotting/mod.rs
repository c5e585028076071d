//! Plotting domain.
//!
//! - `orchestrator.rs` - remote-then-local plot state machine
//! - `remote.rs` - Desmos HTTP client
//! - `local.rs` - `plotters` renderer
//! - `storage.rs` - best-effort persistence of rendered images
//! - `progress.rs` - per-request progress reporter
//! - `series.rs`, `range.rs` - render request types
//! - `data_uri.rs` - PNG data URIs

pub mod data_uri;
mod error;
pub mod local;
pub mod orchestrator;
pub mod progress;
pub mod range;
pub mod remote;
pub mod series;
pub mod storage;

pub use data_uri::{decode_data_uri, encode_data_uri};
pub use error::{RangeError, RemoteError, RenderError, StorageError};
pub use local::{LocalRenderer, PlottersRenderer};
pub use orchestrator::{PlotOrchestrator, PlotOutcome, RenderOutcome, SinglePlot};
pub use progress::ProgressReporter;
pub use range::{DEFAULT_X_RANGE, PlotRange};
pub use remote::{DesmosClient, RemoteRenderer};
pub use series::{PALETTE, PlotSeries, PlotStyle, RenderRequest, palette_color};
pub use storage::{FsPlotStore, Persistence, PlotStore};
