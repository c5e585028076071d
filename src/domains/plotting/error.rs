//! Plotting error types.

use thiserror::Error;

use crate::domains::formula::FormulaError;

/// Errors raised while rendering a plot locally.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// Nothing in the request evaluates to a finite value.
    #[error("'{0}' has no real values in the plotted range")]
    NoFiniteValues(String),

    /// The request contained no series.
    #[error("Nothing to plot")]
    EmptyRequest,

    #[error("Drawing failed: {0}")]
    Drawing(String),

    #[error("Image encoding failed: {0}")]
    Encoding(String),

    /// The blocking render worker panicked or was aborted.
    #[error("Rendering task failed: {0}")]
    Task(String),
}

impl RenderError {
    pub fn drawing(msg: impl ToString) -> Self {
        Self::Drawing(msg.to_string())
    }

    pub fn encoding(msg: impl ToString) -> Self {
        Self::Encoding(msg.to_string())
    }
}

/// An axis range that cannot be plotted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("{axis} must contain finite numbers, got [{low}, {high}]")]
    NotFinite { axis: &'static str, low: f64, high: f64 },

    #[error("{axis} must satisfy low < high, got [{low}, {high}]")]
    Inverted { axis: &'static str, low: f64, high: f64 },

    /// `high - low` overflows.
    #[error("{axis} is too wide to plot, got [{low}, {high}]")]
    TooWide { axis: &'static str, low: f64, high: f64 },
}

/// Errors constructing the remote render client.
///
/// Failed render calls are not errors; they yield no image.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("No Desmos API key configured")]
    MissingCredential,

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors persisting a rendered plot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
