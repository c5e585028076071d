//! Local rendering with `plotters`.
//!
//! Charts are drawn into an in-memory RGB buffer and encoded to PNG with the
//! `image` crate, so nothing touches the filesystem here.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;

use super::error::RenderError;
use super::range::PlotRange;
use super::series::{PlotSeries, RenderRequest};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const SAMPLES: usize = 1001;

/// Largest magnitude an automatic y window may reach.
const Y_LIMIT: f64 = 1e300;

/// Renders a [`RenderRequest`] to PNG bytes.
///
/// Implementations are synchronous; callers run them on a blocking worker.
pub trait LocalRenderer: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError>;
}

/// [`LocalRenderer`] backed by the `plotters` bitmap backend.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
    samples: usize,
}

impl PlottersRenderer {
    pub fn new() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            samples: SAMPLES,
        }
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sampled points of one series.
struct Trace<'a> {
    series: &'a PlotSeries,
    points: Vec<(f64, f64)>,
}

impl Trace<'_> {
    fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.1).filter(|y| y.is_finite())
    }
}

/// Split sampled points into drawable runs.
///
/// A run ends at an undefined sample, or where consecutive samples jump
/// across the visible window in opposite directions (a pole).
fn segments(points: &[(f64, f64)], y: PlotRange) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for &(px, py) in points {
        let pole = current.last().is_some_and(|&(_, prev)| {
            (prev > y.high && py < y.low) || (prev < y.low && py > y.high)
        });
        if !py.is_finite() || pole {
            if current.len() > 1 {
                out.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
        if py.is_finite() {
            current.push((px, py));
        }
    }
    if current.len() > 1 {
        out.push(current);
    }
    out
}

/// Pull far off-screen samples in to one window height beyond the edges so
/// pixel coordinates stay small.
fn clip_to_window(run: Vec<(f64, f64)>, y: PlotRange) -> Vec<(f64, f64)> {
    let pad = y.width().min(Y_LIMIT);
    let (low, high) = (y.low - pad, y.high + pad);
    run.into_iter().map(|(px, py)| (px, py.clamp(low, high))).collect()
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    let index = ((sorted.len() - 1) as f64 * q).round() as usize;
    sorted[index]
}

/// Choose a y window for the finite `values`.
///
/// Uses the full extent unless a few extreme samples (near a pole) would
/// flatten everything else, in which case the 2nd to 98th percentiles are
/// used. A small margin is added; flat data gets a unit window. Values are
/// clamped to `±Y_LIMIT` so the window width stays finite.
fn auto_y_range(values: Vec<f64>) -> Option<PlotRange> {
    let mut values: Vec<f64> = values
        .into_iter()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(-Y_LIMIT, Y_LIMIT))
        .collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let (mut low, mut high) = (values[0], values[values.len() - 1]);
    let core = percentile(&values, 0.95) - percentile(&values, 0.05);
    if high - low > 50.0 * core.max(f64::EPSILON) {
        low = percentile(&values, 0.02);
        high = percentile(&values, 0.98);
    }

    if high - low < 1e-12 {
        return Some(PlotRange {
            low: low - 1.0,
            high: high + 1.0,
        });
    }
    let margin = (high - low) * 0.05;
    Some(PlotRange {
        low: low - margin,
        high: high + margin,
    })
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::encoding("pixel buffer does not match image size"))?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(RenderError::encoding)?;
    Ok(out.into_inner())
}

impl LocalRenderer for PlottersRenderer {
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        if request.series.is_empty() {
            return Err(RenderError::EmptyRequest);
        }

        let traces: Vec<Trace<'_>> = request
            .series
            .iter()
            .map(|series| Trace {
                series,
                points: series.sample(request.x_range, self.samples),
            })
            .collect();

        if let Some(empty) = traces.iter().find(|t| t.finite_values().next().is_none()) {
            return Err(RenderError::NoFiniteValues(empty.series.label.clone()));
        }

        let y_range = match request.y_range {
            Some(range) => range,
            None => auto_y_range(traces.iter().flat_map(Trace::finite_values).collect())
                .ok_or_else(|| RenderError::NoFiniteValues(request.series[0].label.clone()))?,
        };
        let x_range = request.x_range;
        let style = &request.style;

        let mut buffer = vec![0u8; (self.width * self.height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(RenderError::drawing)?;

            let mut builder = ChartBuilder::on(&root);
            builder
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(50);
            if let Some(title) = &style.title {
                builder.caption(title, ("sans-serif", 22));
            }
            let mut chart = builder
                .build_cartesian_2d(x_range.low..x_range.high, y_range.low..y_range.high)
                .map_err(RenderError::drawing)?;

            chart
                .configure_mesh()
                .x_desc(style.x_label.as_str())
                .y_desc(style.y_label.as_str())
                .draw()
                .map_err(RenderError::drawing)?;

            for trace in &traces {
                let color = trace.series.color();
                // An empty series carries the legend entry, so curves with no
                // visible segment are still listed.
                chart
                    .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), color.stroke_width(2)))
                    .map_err(RenderError::drawing)?
                    .label(trace.series.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                for run in segments(&trace.points, y_range) {
                    let run = clip_to_window(run, y_range);
                    chart
                        .draw_series(LineSeries::new(run, color.stroke_width(2)))
                        .map_err(RenderError::drawing)?;
                }
            }

            if style.legend {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()
                    .map_err(RenderError::drawing)?;
            }

            root.present().map_err(RenderError::drawing)?;
        }

        encode_png(buffer, self.width, self.height)
    }
}
