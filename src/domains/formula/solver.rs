//! Real domain, range and equation solving for single-variable functions.
//!
//! Everything is numeric over a compiled [`RealFunction`]: NaN marks points
//! outside the real domain, an isolated ±∞ or a root of `1/f` marks a pole,
//! and ±∞ or 0 over a whole run is overflow or underflow inside the domain.
//! Boundaries are refined by bisection and every reported value is snapped to
//! an exact form.

use super::compiled::RealFunction;
use super::numeric::{
    self, Approach, MAX_LISTED, PeriodicFamily, detect_periodic, find_roots, snap, snap_all,
};
use super::sets::{Endpoint, Interval, RealSet, SolutionSet, union};

/// Join neighbouring intervals separated only by a member of an excluded family.
fn absorb_excluded(intervals: Vec<Interval>, excluded: &[PeriodicFamily]) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::new();
    for next in intervals {
        if let Some(current) = out.last_mut() {
            let gap = next.lo.raw() - current.hi.raw();
            if gap.abs() < 1e-9 && excluded.iter().any(|family| family.contains(next.lo.raw())) {
                current.hi = next.hi;
                continue;
            }
        }
        out.push(next);
    }
    out
}

/// Locate the edge of a defined run between `inside` and `outside`.
///
/// Rational edges are closed exactly when the function is finite there.
/// Irrational edges cannot be evaluated exactly, so they are closed when the
/// function approaches a finite value from inside.
fn boundary(f: &impl Fn(f64) -> f64, inside: f64, outside: f64, inward: f64) -> Endpoint {
    let raw = numeric::bisect_boundary(|x| !f(x).is_nan(), inside, outside);
    let snapped = snap(raw);
    let closed = f(snapped.value).is_finite()
        || (!snapped.is_rational()
            && matches!(
                numeric::approach_point(f, snapped.value, inward),
                Approach::Converges(_)
            ));
    Endpoint {
        value: snapped,
        closed,
    }
}

/// Poles of `f`: roots of `1/f` with finite values close by on both sides.
fn poles(function: &RealFunction, grid: &[f64]) -> Vec<f64> {
    let reciprocal = |x: f64| {
        let v = function.eval(x);
        if v.is_nan() {
            return None;
        }
        let r = 1.0 / v;
        r.is_finite().then_some(r)
    };
    find_roots(reciprocal, grid)
        .into_iter()
        .filter(|&p| {
            let h = 1e-6 * p.abs().max(1.0);
            function.eval(p - h).is_finite() && function.eval(p + h).is_finite()
        })
        .collect()
}

/// The set of real `x` for which `function` is defined.
///
/// When the scan finds more isolated defined points than can be listed (a
/// real power of a negative base at integers, say) they are dropped and the
/// set is shown as a condition set over the remaining intervals.
pub fn domain(function: &RealFunction) -> RealSet {
    let f = |x: f64| function.eval(x);
    if function.is_constant() {
        return if f(0.0).is_finite() {
            RealSet::reals()
        } else {
            RealSet::empty()
        };
    }

    let grid = numeric::scan_grid();
    let flags: Vec<bool> = grid.iter().map(|&x| !f(x).is_nan()).collect();
    let last = grid.len() - 1;

    let mut intervals = Vec::new();
    let mut i = 0;
    while i < grid.len() {
        if !flags[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < last && flags[i + 1] {
            i += 1;
        }
        let lo = if start == 0 {
            Endpoint::neg_infinity()
        } else {
            boundary(&f, grid[start], grid[start - 1], 1.0)
        };
        let hi = if i == last {
            Endpoint::infinity()
        } else {
            boundary(&f, grid[i], grid[i + 1], -1.0)
        };
        intervals.push(Interval::new(lo, hi));
        i += 1;
    }

    let isolated = intervals.iter().filter(|i| i.is_point()).count();
    let sparse = isolated > MAX_LISTED;
    if sparse {
        intervals.retain(|i| !i.is_point());
    }

    let mut excluded: Vec<PeriodicFamily> = Vec::new();
    let mut too_many = false;
    let pole_points = poles(function, &grid);
    if let Some(families) = detect_periodic(&pole_points) {
        excluded.extend(families);
    } else if pole_points.len() > MAX_LISTED {
        too_many = true;
    } else {
        for pole in snap_all(&pole_points) {
            intervals = intervals
                .into_iter()
                .flat_map(|interval| interval.remove_point(&pole))
                .collect();
        }
    }

    let intervals = absorb_excluded(union(intervals), &excluded);
    let condition = (sparse || too_many || intervals.len() > MAX_LISTED)
        .then(|| format!("{} is real", function));

    RealSet {
        intervals,
        excluded,
        condition,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    /// Attained at a critical point or a closed endpoint.
    Attained,
    /// Attained at a scan sample.
    Sampled,
    /// Approached but not attained.
    Limit,
}

#[derive(Debug, Default)]
struct Candidates {
    values: Vec<(f64, Kind)>,
    unbounded_below: bool,
    unbounded_above: bool,
}

impl Candidates {
    /// Record a value. Overflowed samples mark the range as unbounded.
    fn push(&mut self, value: f64, kind: Kind) {
        if value.is_finite() {
            self.values.push((value, kind));
        } else if value == f64::INFINITY {
            self.unbounded_above = true;
        } else if value == f64::NEG_INFINITY {
            self.unbounded_below = true;
        }
    }

    fn approach(&mut self, approach: Approach) {
        match approach {
            Approach::Converges(v) => self.push(v, Kind::Limit),
            Approach::Diverges(sign) if sign > 0.0 => self.unbounded_above = true,
            Approach::Diverges(_) => self.unbounded_below = true,
            Approach::Oscillates { unbounded: true } => {
                self.unbounded_above = true;
                self.unbounded_below = true;
            }
            Approach::Oscillates { .. } | Approach::Undefined => {}
        }
    }

    fn bound(&self, lower: bool) -> Option<Endpoint> {
        if lower && self.unbounded_below {
            return Some(Endpoint::neg_infinity());
        }
        if !lower && self.unbounded_above {
            return Some(Endpoint::infinity());
        }

        let values = self.values.iter().map(|(v, _)| *v);
        let extreme = if lower {
            values.fold(f64::INFINITY, f64::min)
        } else {
            values.fold(f64::NEG_INFINITY, f64::max)
        };
        if !extreme.is_finite() {
            return None;
        }

        let snapped = snap(extreme);
        let matches = |kind: Kind| {
            self.values
                .iter()
                .any(|(v, k)| *k == kind && (snap(*v).value - snapped.value).abs() < 1e-9)
        };
        let closed =
            matches(Kind::Attained) || (matches(Kind::Sampled) && !matches(Kind::Limit));
        Some(Endpoint {
            value: snapped,
            closed,
        })
    }
}

/// The pieces of `domain` to examine when computing a range.
///
/// Periodic exclusions only arise from periodic factors, so the bounded
/// windows between the excluded points near the origin stand in for the rest
/// of the line.
fn scan_windows(domain: &RealSet) -> Vec<Interval> {
    if domain.excluded.is_empty() {
        return domain.intervals.clone();
    }

    let mut members: Vec<f64> = domain
        .excluded
        .iter()
        .flat_map(|family| family.members_within(-10.0, 10.0))
        .collect();
    members.sort_by(|a, b| a.total_cmp(b));
    members.dedup_by(|a, b| (*a - *b).abs() < 1e-9);

    members
        .windows(2)
        .map(|w| Interval::new(Endpoint::open(snap(w[0])), Endpoint::open(snap(w[1]))))
        .flat_map(|window| {
            domain
                .intervals
                .iter()
                .filter_map(|interval| interval.intersect(&window))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// The set of values `function` takes over `domain`.
///
/// `derivative` locates interior extrema. A condition-set domain is scanned
/// over the intervals it still carries.
pub fn range(function: &RealFunction, derivative: &RealFunction, domain: &RealSet) -> RealSet {
    if domain.is_empty() {
        return RealSet::empty();
    }

    let f = |x: f64| function.eval(x);
    if function.is_constant() {
        return RealSet::from_intervals(vec![Interval::point(snap(f(0.0)))]);
    }

    let grid = numeric::scan_grid();
    let critical = find_roots(
        |x| {
            if domain.contains(x) && f(x).is_finite() {
                derivative.eval_finite(x)
            } else {
                None
            }
        },
        &grid,
    );

    let mut pieces = Vec::new();
    for interval in &scan_windows(domain) {
        let mut candidates = Candidates::default();

        for &c in critical.iter().filter(|c| interval.contains(**c)) {
            candidates.push(f(c), Kind::Attained);
        }
        for &x in grid
            .iter()
            .filter(|x| x.abs() <= 10.0 && interval.contains(**x) && domain.contains(**x))
        {
            candidates.push(f(x), Kind::Sampled);
        }

        for (end, inward) in [(&interval.lo, 1.0), (&interval.hi, -1.0)] {
            let p = end.raw();
            if p.is_infinite() {
                candidates.approach(numeric::approach_infinity(&f, p.signum()));
                continue;
            }
            let approach = numeric::approach_point(&f, p, inward);
            if end.closed {
                match (f(p), approach) {
                    (v, _) if v.is_finite() => candidates.push(v, Kind::Attained),
                    (_, Approach::Converges(v)) => candidates.push(v, Kind::Attained),
                    _ => {}
                }
            } else {
                candidates.approach(approach);
            }
        }

        if let (Some(lo), Some(hi)) = (candidates.bound(true), candidates.bound(false)) {
            pieces.push(Interval::new(lo, hi));
        }
    }

    RealSet::from_intervals(pieces)
}

/// Solve `function = 0` for real `x` within `over`.
pub fn solve(function: &RealFunction, over: &RealSet) -> SolutionSet {
    if over.is_empty() {
        return SolutionSet::Empty;
    }
    if function.is_constant() {
        return if function.eval(0.0) == 0.0 {
            SolutionSet::Everywhere
        } else {
            SolutionSet::Empty
        };
    }

    let grid = numeric::scan_grid();
    let roots = find_roots(
        |x| {
            if over.contains(x) {
                function.eval_finite(x)
            } else {
                None
            }
        },
        &grid,
    );

    if let Some(families) = detect_periodic(&roots) {
        return SolutionSet::Periodic(families);
    }
    if roots.is_empty() {
        return SolutionSet::Empty;
    }

    let mut values = snap_all(&roots);
    let truncated = values.len() > MAX_LISTED;
    values.truncate(MAX_LISTED);
    SolutionSet::Points { values, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::formula::Formula;

    fn compile(text: &str) -> (RealFunction, RealFunction) {
        let formula = Formula::parse(text).unwrap();
        let derivative = formula.derivative().unwrap();
        (
            formula.function().unwrap(),
            RealFunction::compile(&derivative, derivative.to_string()).unwrap(),
        )
    }

    fn domain_of(text: &str) -> String {
        domain(&compile(text).0).to_string()
    }

    fn range_of(text: &str) -> String {
        let (f, df) = compile(text);
        let d = domain(&f);
        range(&f, &df, &d).to_string()
    }

    fn roots_of(text: &str) -> String {
        solve(&compile(text).0, &RealSet::reals()).describe("x")
    }

    fn critical_points_of(text: &str) -> String {
        solve(&compile(text).1, &RealSet::reals()).describe("x")
    }

    #[test]
    fn test_domain_polynomial_and_roots() {
        assert_eq!(domain_of("x^2"), "ℝ");
        assert_eq!(domain_of("sqrt(x)"), "[0, ∞)");
        assert_eq!(domain_of("log(x)"), "(0, ∞)");
        assert_eq!(domain_of("sqrt(4 - x^2)"), "[-2, 2]");
        assert_eq!(domain_of("sqrt(x^2 - 2)"), "(-∞, -sqrt(2)] ∪ [sqrt(2), ∞)");
        assert_eq!(domain_of("sqrt(-x^2)"), "{0}");
    }

    #[test]
    fn test_domain_removes_poles() {
        assert_eq!(domain_of("1/x"), "(-∞, 0) ∪ (0, ∞)");
        assert_eq!(domain_of("1/(x - 1/3)"), "(-∞, 1/3) ∪ (1/3, ∞)");
        assert_eq!(domain_of("1/(x - 0.003)^2"), "(-∞, 0.003) ∪ (0.003, ∞)");
        assert_eq!(domain_of("tan(x)"), "ℝ \\ {pi/2 + pi·n | n ∈ ℤ}");
        assert_eq!(domain_of("1/sin(x)"), "ℝ \\ {pi·n | n ∈ ℤ}");
    }

    #[test]
    fn test_domain_falls_back_to_condition_set() {
        assert_eq!(domain_of("sqrt(sin(x))"), "{x ∈ ℝ | sqrt(sin(x)) is real}");
    }

    #[test]
    fn test_domain_of_constant() {
        assert_eq!(domain_of("5"), "ℝ");
        assert_eq!(domain_of("sqrt(-1)"), "∅");
    }

    #[test]
    fn test_overflow_stays_in_domain() {
        assert_eq!(domain_of("cosh(x)"), "ℝ");
        assert_eq!(domain_of("exp(x)"), "ℝ");
        assert_eq!(domain_of("x^1e308"), "ℝ");
    }

    #[test]
    fn test_range() {
        assert_eq!(range_of("x^2"), "[0, ∞)");
        assert_eq!(range_of("sin(x)"), "[-1, 1]");
        assert_eq!(range_of("exp(x)"), "(0, ∞)");
        assert_eq!(range_of("1/(x^2 + 1)"), "(0, 1]");
        assert_eq!(range_of("atan(x)"), "(-pi/2, pi/2)");
        assert_eq!(range_of("log(x)"), "ℝ");
        assert_eq!(range_of("1/x"), "(-∞, 0) ∪ (0, ∞)");
        assert_eq!(range_of("tan(x)"), "ℝ");
        assert_eq!(range_of("1/sin(x)"), "(-∞, -1] ∪ [1, ∞)");
        assert_eq!(range_of("7"), "{7}");
    }

    #[test]
    fn test_range_of_overflowing_functions() {
        assert_eq!(range_of("cosh(x)"), "[1, ∞)");
        assert_eq!(range_of("tanh(x)"), "(-1, 1)");
    }

    #[test]
    fn test_range_over_condition_set_domain() {
        let (f, df) = compile("x^x");
        let d = domain(&f);
        assert!(d.condition.is_some());
        assert!(d.intervals.iter().all(|i| i.lo.raw() >= 0.0));
        assert_eq!(range(&f, &df, &d).to_string(), "[0.692201, ∞)");
    }

    #[test]
    fn test_solve() {
        assert_eq!(roots_of("x^2 - 1"), "x = -1, x = 1");
        assert_eq!(roots_of("x^2 + 1"), "None found.");
        assert_eq!(roots_of("cos(x)"), "x = pi/2 + pi·n, n ∈ ℤ");
        assert_eq!(roots_of("0"), "every real x");
    }

    #[test]
    fn test_underflow_is_not_a_root() {
        let roots = roots_of("exp(-x^2)*sin(pi*x)");
        assert!(!roots.contains("10000"), "{}", roots);
        assert_eq!(roots, "x = n, n ∈ ℤ");
        assert_eq!(roots_of("exp(x)"), "None found.");
    }

    #[test]
    fn test_flat_tails_have_no_critical_points() {
        assert_eq!(critical_points_of("tanh(x)"), "None found.");
        assert_eq!(critical_points_of("atan(x)"), "None found.");
        assert_eq!(critical_points_of("x^2"), "x = 0");
    }
}
