//! Subsets of the real line as produced by domain, range and solve.

use std::fmt;

use super::numeric::{PeriodicFamily, Snapped, snap};

const TOLERANCE: f64 = 1e-9;

/// One end of an interval. Infinite ends are always open.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub value: Snapped,
    pub closed: bool,
}

impl Endpoint {
    pub fn closed(value: Snapped) -> Self {
        Self {
            value,
            closed: true,
        }
    }

    pub fn open(value: Snapped) -> Self {
        Self {
            value,
            closed: false,
        }
    }

    pub fn neg_infinity() -> Self {
        Self::open(snap(f64::NEG_INFINITY))
    }

    pub fn infinity() -> Self {
        Self::open(snap(f64::INFINITY))
    }

    pub fn raw(&self) -> f64 {
        self.value.value
    }
}

/// A connected subset of the real line.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub lo: Endpoint,
    pub hi: Endpoint,
}

impl Interval {
    pub fn new(lo: Endpoint, hi: Endpoint) -> Self {
        Self { lo, hi }
    }

    pub fn real_line() -> Self {
        Self::new(Endpoint::neg_infinity(), Endpoint::infinity())
    }

    pub fn point(value: Snapped) -> Self {
        Self::new(Endpoint::closed(value.clone()), Endpoint::closed(value))
    }

    pub fn is_real_line(&self) -> bool {
        self.lo.raw() == f64::NEG_INFINITY && self.hi.raw() == f64::INFINITY
    }

    pub fn is_point(&self) -> bool {
        (self.lo.raw() - self.hi.raw()).abs() < TOLERANCE
    }

    pub fn contains(&self, x: f64) -> bool {
        let above = x > self.lo.raw() || (self.lo.closed && (x - self.lo.raw()).abs() < TOLERANCE);
        let below = x < self.hi.raw() || (self.hi.closed && (x - self.hi.raw()).abs() < TOLERANCE);
        above && below
    }

    /// The overlap of two intervals, if any.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let lo = if self.lo.raw() > other.lo.raw() + TOLERANCE {
            self.lo.clone()
        } else if other.lo.raw() > self.lo.raw() + TOLERANCE {
            other.lo.clone()
        } else {
            Endpoint {
                value: self.lo.value.clone(),
                closed: self.lo.closed && other.lo.closed,
            }
        };
        let hi = if self.hi.raw() < other.hi.raw() - TOLERANCE {
            self.hi.clone()
        } else if other.hi.raw() < self.hi.raw() - TOLERANCE {
            other.hi.clone()
        } else {
            Endpoint {
                value: self.hi.value.clone(),
                closed: self.hi.closed && other.hi.closed,
            }
        };

        let width = hi.raw() - lo.raw();
        if width < -TOLERANCE || (width.abs() < TOLERANCE && !(lo.closed && hi.closed)) {
            return None;
        }
        Some(Interval::new(lo, hi))
    }

    /// Remove a single point, returning the (at most two) remaining pieces.
    pub fn remove_point(self, point: &Snapped) -> Vec<Interval> {
        let p = point.value;
        if !self.contains(p) {
            return vec![self];
        }
        if self.is_point() {
            return Vec::new();
        }
        if (p - self.lo.raw()).abs() < TOLERANCE {
            return vec![Interval::new(Endpoint::open(self.lo.value), self.hi)];
        }
        if (p - self.hi.raw()).abs() < TOLERANCE {
            return vec![Interval::new(self.lo, Endpoint::open(self.hi.value))];
        }
        vec![
            Interval::new(self.lo, Endpoint::open(point.clone())),
            Interval::new(Endpoint::open(point.clone()), self.hi),
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_point() {
            return write!(f, "{{{}}}", self.lo.value);
        }
        let open = if self.lo.closed { "[" } else { "(" };
        let close = if self.hi.closed { "]" } else { ")" };
        write!(f, "{}{}, {}{}", open, self.lo.value, self.hi.value, close)
    }
}

/// Merge overlapping or touching intervals into a sorted, disjoint list.
pub fn union(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by(|a, b| {
        a.lo.raw()
            .total_cmp(&b.lo.raw())
            .then_with(|| b.lo.closed.cmp(&a.lo.closed))
    });

    let mut merged: Vec<Interval> = Vec::new();
    for next in intervals {
        let Some(current) = merged.last_mut() else {
            merged.push(next);
            continue;
        };

        let gap = next.lo.raw() - current.hi.raw();
        let touching = gap.abs() < TOLERANCE && (current.hi.closed || next.lo.closed);
        if gap < -TOLERANCE || touching {
            if (next.lo.raw() - current.lo.raw()).abs() < TOLERANCE {
                current.lo.closed |= next.lo.closed;
            }
            let diff = next.hi.raw() - current.hi.raw();
            if diff.abs() < TOLERANCE || (next.hi.raw().is_infinite() && current.hi.raw() == next.hi.raw()) {
                current.hi.closed |= next.hi.closed;
            } else if diff > 0.0 {
                current.hi = next.hi;
            }
        } else {
            merged.push(next);
        }
    }
    merged
}

/// A subset of ℝ.
///
/// Most sets are a finite union of intervals, optionally with infinitely many
/// isolated points removed (`ℝ \ {pi/2 + pi·n | n ∈ ℤ}`). When a set has too
/// many pieces to list it is shown as a condition set instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RealSet {
    pub intervals: Vec<Interval>,
    pub excluded: Vec<PeriodicFamily>,
    pub condition: Option<String>,
}

impl RealSet {
    pub fn empty() -> Self {
        Self::from_intervals(Vec::new())
    }

    pub fn reals() -> Self {
        Self::from_intervals(vec![Interval::real_line()])
    }

    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self {
            intervals: union(intervals),
            excluded: Vec::new(),
            condition: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.intervals.iter().any(|i| i.contains(x))
            && !self.excluded.iter().any(|family| family.contains(x))
    }
}

fn format_families(families: &[PeriodicFamily]) -> String {
    families
        .iter()
        .map(|family| format!("{{{} | n ∈ ℤ}}", family))
        .collect::<Vec<_>>()
        .join(" ∪ ")
}

impl fmt::Display for RealSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(condition) = &self.condition {
            return write!(f, "{{x ∈ ℝ | {}}}", condition);
        }
        if self.intervals.is_empty() {
            return write!(f, "∅");
        }

        let base = if self.intervals.len() == 1 && self.intervals[0].is_real_line() {
            "ℝ".to_string()
        } else if self.intervals.iter().all(Interval::is_point) {
            let points: Vec<String> = self
                .intervals
                .iter()
                .map(|i| i.lo.value.to_string())
                .collect();
            format!("{{{}}}", points.join(", "))
        } else {
            self.intervals
                .iter()
                .map(Interval::to_string)
                .collect::<Vec<_>>()
                .join(" ∪ ")
        };

        if self.excluded.is_empty() {
            write!(f, "{}", base)
        } else {
            write!(f, "{} \\ {}", base, format_families(&self.excluded))
        }
    }
}

/// Solutions of an equation over the reals.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionSet {
    /// No real solution.
    Empty,
    /// Finitely many solutions; `truncated` when more exist than are listed.
    Points { values: Vec<Snapped>, truncated: bool },
    /// Infinitely many, evenly spaced solutions.
    Periodic(Vec<PeriodicFamily>),
    /// The equation holds for every real number in the search set.
    Everywhere,
}

impl SolutionSet {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Render as `x = a, x = b` using the given variable name.
    pub fn describe(&self, var: &str) -> String {
        match self {
            Self::Empty => "None found.".to_string(),
            Self::Points { values, truncated } => {
                let mut text = values
                    .iter()
                    .map(|v| format!("{} = {}", var, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                if *truncated {
                    text.push_str(", ...");
                }
                text
            }
            Self::Periodic(families) => families
                .iter()
                .map(|family| format!("{} = {}, n ∈ ℤ", var, family))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Everywhere => format!("every real {}", var),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(v: f64) -> Endpoint {
        Endpoint::closed(snap(v))
    }

    fn open(v: f64) -> Endpoint {
        Endpoint::open(snap(v))
    }

    #[test]
    fn test_display_basic_sets() {
        assert_eq!(RealSet::reals().to_string(), "ℝ");
        assert_eq!(RealSet::empty().to_string(), "∅");

        let half = RealSet::from_intervals(vec![Interval::new(closed(0.0), Endpoint::infinity())]);
        assert_eq!(half.to_string(), "[0, ∞)");

        let point = RealSet::from_intervals(vec![Interval::point(snap(5.0))]);
        assert_eq!(point.to_string(), "{5}");
    }

    #[test]
    fn test_remove_point_splits_interval() {
        let pieces = Interval::real_line().remove_point(&snap(0.0));
        let set = RealSet::from_intervals(pieces);
        assert_eq!(set.to_string(), "(-∞, 0) ∪ (0, ∞)");
        assert!(!set.contains(0.0));
        assert!(set.contains(-3.0));
    }

    #[test]
    fn test_union_merges_touching_intervals() {
        let merged = union(vec![
            Interval::new(open(1.0), closed(2.0)),
            Interval::new(open(-1.0), open(1.0)),
            Interval::new(open(2.0), open(3.0)),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].to_string(), "(-1, 1)");
        assert_eq!(merged[1].to_string(), "(1, 3)");

        let merged = union(vec![
            Interval::new(open(0.0), closed(1.0)),
            Interval::new(closed(0.0), open(1.0)),
        ]);
        assert_eq!(merged[0].to_string(), "[0, 1]");
    }

    #[test]
    fn test_intersect() {
        let a = Interval::new(closed(0.0), Endpoint::infinity());
        let b = Interval::new(open(-1.0), open(2.0));
        assert_eq!(a.intersect(&b).unwrap().to_string(), "[0, 2)");

        let c = Interval::new(open(2.0), open(3.0));
        assert!(b.intersect(&c).is_none());
    }

    #[test]
    fn test_solution_set_description() {
        let points = SolutionSet::Points {
            values: vec![snap(-1.0), snap(1.0)],
            truncated: false,
        };
        assert_eq!(points.describe("x"), "x = -1, x = 1");
        assert_eq!(SolutionSet::Empty.describe("x"), "None found.");
    }
}
