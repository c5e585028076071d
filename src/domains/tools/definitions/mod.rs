//! Tool definitions module.
//!
//! One file per tool. Each exposes `NAME`, `DESCRIPTION`, an `execute`
//! function, `to_tool()` metadata, a `create_route()` for STDIO/TCP and an
//! `http_handler()` for the HTTP transport.

pub mod analyze;
pub mod common;
pub mod hello;
pub mod plot;
pub mod plot_multiple;
pub mod validate;

pub use analyze::{AnalyzeFormulaParams, AnalyzeFormulaTool};
pub use hello::{HelloParams, HelloTool};
pub use plot::{PlotMathFunctionParams, PlotMathFunctionTool};
pub use plot_multiple::{PlotMultipleFunctionsParams, PlotMultipleFunctionsTool};
pub use validate::{ValidateFormulaParams, ValidateFormulaTool};
