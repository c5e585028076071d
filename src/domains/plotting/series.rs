//! Plot requests: series, styling and the color cycle.

use plotters::style::RGBColor;

use crate::domains::formula::RealFunction;

use super::range::PlotRange;

/// The ten-color cycle `C0..C9` used for series colors.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Color for the `index`-th series, cycling through [`PALETTE`].
pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// One function to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub function: RealFunction,
    pub label: String,
    pub color_index: usize,
}

impl PlotSeries {
    pub fn new(function: RealFunction, label: impl Into<String>, color_index: usize) -> Self {
        Self {
            function,
            label: label.into(),
            color_index,
        }
    }

    pub fn color(&self) -> RGBColor {
        palette_color(self.color_index)
    }

    /// Evaluate the series at `samples` evenly spaced points of `range`.
    ///
    /// Undefined points are returned as NaN so callers can split the line.
    pub fn sample(&self, range: PlotRange, samples: usize) -> Vec<(f64, f64)> {
        let steps = samples.max(2) - 1;
        (0..=steps)
            .map(|i| {
                let x = range.low + range.width() * i as f64 / steps as f64;
                let y = self.function.eval(x);
                (x, if y.is_finite() { y } else { f64::NAN })
            })
            .collect()
    }
}

/// Labels and decorations of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub legend: bool,
}

impl PlotStyle {
    /// Single formula: titled with the formula text, no legend.
    pub fn single(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            legend: false,
        }
    }

    /// Several formulas on one frame, with a legend.
    pub fn multiple() -> Self {
        Self {
            title: None,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            legend: true,
        }
    }
}

/// Everything a local renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Drawn in order; later series are on top and listed later in the legend.
    pub series: Vec<PlotSeries>,
    pub x_range: PlotRange,
    /// Auto-scaled when absent.
    pub y_range: Option<PlotRange>,
    pub style: PlotStyle,
}
