//! Axis ranges.

use std::fmt;

use serde::Serialize;

use super::error::RangeError;

/// The x range used when a request does not give one.
pub const DEFAULT_X_RANGE: PlotRange = PlotRange {
    low: -10.0,
    high: 10.0,
};

/// A finite interval `[low, high]` with `low < high` and a finite width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotRange {
    pub low: f64,
    pub high: f64,
}

impl PlotRange {
    /// Validate a `[low, high]` pair for the named axis.
    pub fn new(axis: &'static str, low: f64, high: f64) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RangeError::NotFinite { axis, low, high });
        }
        if low >= high {
            return Err(RangeError::Inverted { axis, low, high });
        }
        if !(high - low).is_finite() {
            return Err(RangeError::TooWide { axis, low, high });
        }
        Ok(Self { low, high })
    }

    /// The x range of a request, defaulting to [`DEFAULT_X_RANGE`].
    pub fn x_axis(pair: Option<[f64; 2]>) -> Result<Self, RangeError> {
        match pair {
            Some([low, high]) => Self::new("x_range", low, high),
            None => Ok(DEFAULT_X_RANGE),
        }
    }

    /// The optional y range of a request.
    pub fn y_axis(pair: Option<[f64; 2]>) -> Result<Option<Self>, RangeError> {
        pair.map(|[low, high]| Self::new("y_range", low, high))
            .transpose()
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.low, self.high]
    }
}

impl Default for PlotRange {
    fn default() -> Self {
        DEFAULT_X_RANGE
    }
}

impl fmt::Display for PlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_range_defaults() {
        assert_eq!(PlotRange::x_axis(None).unwrap(), DEFAULT_X_RANGE);
        assert_eq!(PlotRange::x_axis(Some([0.0, 5.0])).unwrap().width(), 5.0);
    }

    #[test]
    fn test_y_range_is_optional() {
        assert_eq!(PlotRange::y_axis(None).unwrap(), None);
        assert_eq!(
            PlotRange::y_axis(Some([-1.0, 1.0])).unwrap(),
            Some(PlotRange { low: -1.0, high: 1.0 })
        );
    }

    #[test]
    fn test_rejects_invalid_ranges() {
        assert!(matches!(
            PlotRange::x_axis(Some([3.0, 3.0])),
            Err(RangeError::Inverted { axis: "x_range", .. })
        ));
        assert!(matches!(
            PlotRange::y_axis(Some([0.0, f64::INFINITY])),
            Err(RangeError::NotFinite { axis: "y_range", .. })
        ));

        let err = PlotRange::x_axis(Some([5.0, -5.0])).unwrap_err();
        assert_eq!(err.to_string(), "x_range must satisfy low < high, got [5, -5]");
    }

    #[test]
    fn test_rejects_overflowing_width() {
        assert!(matches!(
            PlotRange::x_axis(Some([-1e308, 1e308])),
            Err(RangeError::TooWide { axis: "x_range", .. })
        ));
        assert!(PlotRange::y_axis(Some([-1e307, 1e307])).is_ok());
    }
}
