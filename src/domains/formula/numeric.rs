//! Numeric building blocks for domain, range and equation solving.
//!
//! Everything here works on a fixed scan grid that is dense near the origin and
//! sparser further out, refines boundaries by bisection, and snaps results to
//! exact-looking values (integers, small fractions, square roots, multiples of
//! pi) so reports read like symbolic answers.

use std::f64::consts::PI;
use std::fmt;

/// Half-width of the scanned window. Anything beyond is treated as infinity.
pub const SCAN_LIMIT: f64 = 1e4;

/// Roots closer than this are considered the same root.
const ROOT_MERGE: f64 = 1e-7;

/// Maximum number of isolated values reported before treating a solution set
/// as infinite.
pub const MAX_LISTED: usize = 20;

/// Build the scan grid: step 0.01 on [-10, 10], 0.1 to 100, 1 to 1000,
/// 10 to [`SCAN_LIMIT`].
pub fn scan_grid() -> Vec<f64> {
    let bands: [(f64, f64); 4] = [(10.0, 0.01), (100.0, 0.1), (1000.0, 1.0), (SCAN_LIMIT, 10.0)];
    let mut positive = Vec::new();
    let mut lower = 0.0;
    for (upper, step) in bands {
        let count = ((upper - lower) / step).round() as usize;
        for k in 1..=count {
            positive.push(lower + k as f64 * step);
        }
        lower = upper;
    }

    let mut grid: Vec<f64> = positive.iter().rev().map(|v| -v).collect();
    grid.push(0.0);
    grid.extend(positive);
    grid
}

/// Which exact form a snapped value was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    Integer,
    Rational,
    PiMultiple,
    Root,
    Decimal,
    Infinite,
}

/// A real value together with its exact-looking textual form.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapped {
    pub value: f64,
    pub repr: String,
    pub kind: SnapKind,
}

impl Snapped {
    /// True for integers and small fractions.
    pub fn is_rational(&self) -> bool {
        matches!(self.kind, SnapKind::Integer | SnapKind::Rational)
    }
}

impl fmt::Display for Snapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

fn format_decimal(v: f64) -> String {
    let text = format!("{:.6}", v);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

fn fraction_repr(p: i64, q: i64, suffix: &str) -> String {
    let sign = if p < 0 { "-" } else { "" };
    let p = p.abs();
    match (p, q, suffix.is_empty()) {
        (_, 1, true) => format!("{}{}", sign, p),
        (1, 1, false) => format!("{}{}", sign, suffix),
        (_, 1, false) => format!("{}{}*{}", sign, p, suffix),
        (_, _, true) => format!("{}{}/{}", sign, p, q),
        (1, _, false) => format!("{}{}/{}", sign, suffix, q),
        (_, _, false) => format!("{}{}*{}/{}", sign, p, suffix, q),
    }
}

/// Snap a value to a nearby exact form when one is within tolerance.
pub fn snap(v: f64) -> Snapped {
    if !v.is_finite() {
        let repr = if v > 0.0 { "∞" } else { "-∞" };
        return Snapped {
            value: v,
            repr: repr.to_string(),
            kind: SnapKind::Infinite,
        };
    }

    let rounded = v.round();
    if (v - rounded).abs() < 1e-7 {
        return Snapped {
            value: rounded + 0.0,
            repr: format!("{}", rounded as i64),
            kind: SnapKind::Integer,
        };
    }

    for q in 2..=12_i64 {
        let p = (v * q as f64).round();
        if (v - p / q as f64).abs() < 1e-9 && gcd(p as i64, q) == 1 {
            return Snapped {
                value: p / q as f64,
                repr: fraction_repr(p as i64, q, ""),
                kind: SnapKind::Rational,
            };
        }
    }

    let over_pi = v / PI;
    for q in 1..=12_i64 {
        let p = (over_pi * q as f64).round();
        if p != 0.0 && (v - p * PI / q as f64).abs() < 1e-9 && gcd(p as i64, q) == 1 {
            return Snapped {
                value: p * PI / q as f64,
                repr: fraction_repr(p as i64, q, "pi"),
                kind: SnapKind::PiMultiple,
            };
        }
    }

    let squared = v * v;
    let n = squared.round();
    if n >= 2.0 && n <= 1000.0 && (squared - n).abs() < 1e-8 {
        let root = n.sqrt();
        if root.fract() != 0.0 {
            let sign = if v < 0.0 { "-" } else { "" };
            return Snapped {
                value: root.copysign(v),
                repr: format!("{}sqrt({})", sign, n as i64),
                kind: SnapKind::Root,
            };
        }
    }

    Snapped {
        value: v,
        repr: format_decimal(v),
        kind: SnapKind::Decimal,
    }
}

/// Bisect between a point where `pred` holds and one where it does not,
/// returning the approximate switch point.
pub fn bisect_boundary(pred: impl Fn(f64) -> bool, inside: f64, outside: f64) -> f64 {
    let (mut a, mut b) = (inside, outside);
    for _ in 0..80 {
        let mid = 0.5 * (a + b);
        if mid == a || mid == b {
            break;
        }
        if pred(mid) {
            a = mid;
        } else {
            b = mid;
        }
    }
    0.5 * (a + b)
}

fn bisect_root(g: &impl Fn(f64) -> Option<f64>, mut a: f64, mut b: f64, ga: f64) -> Option<f64> {
    let mut sign_a = ga.signum();
    for _ in 0..100 {
        let mid = 0.5 * (a + b);
        if mid == a || mid == b {
            break;
        }
        let gm = g(mid)?;
        if gm == 0.0 {
            return Some(mid);
        }
        if gm.signum() == sign_a {
            a = mid;
            sign_a = gm.signum();
        } else {
            b = mid;
        }
    }
    Some(0.5 * (a + b))
}

fn golden_min_abs(g: &impl Fn(f64) -> Option<f64>, mut a: f64, mut b: f64) -> Option<f64> {
    let ratio = 0.5 * (5f64.sqrt() - 1.0);
    for _ in 0..100 {
        let c = b - ratio * (b - a);
        let d = a + ratio * (b - a);
        if g(c)?.abs() < g(d)?.abs() {
            b = d;
        } else {
            a = c;
        }
    }
    Some(0.5 * (a + b))
}

/// Smallest neighbour magnitude for a touching root. Below this the function
/// is lost in underflow or cancellation noise.
const TOUCH_FLOOR: f64 = 1e-12;

/// Find real roots of `g` on the scan grid.
///
/// Sign changes are refined by bisection and kept only when `g` is actually
/// small there (so poles are not mistaken for roots). Touching roots with no
/// sign change are found by minimizing `|g|` around local minima. A sample
/// that is exactly zero only counts when its neighbours are not, so runs of
/// underflowed zeros do not turn into roots.
pub fn find_roots(g: impl Fn(f64) -> Option<f64>, grid: &[f64]) -> Vec<f64> {
    let values: Vec<Option<f64>> = grid.iter().map(|&x| g(x)).collect();
    let nonzero = |j: Option<usize>| match j.and_then(|j| values.get(j)) {
        Some(Some(v)) => *v != 0.0,
        Some(None) => true,
        None => true,
    };
    let mut roots = Vec::new();

    for i in 0..grid.len() {
        let Some(gi) = values[i] else { continue };
        if gi == 0.0 {
            if nonzero(i.checked_sub(1)) && nonzero(Some(i + 1)) {
                roots.push(grid[i]);
            }
            continue;
        }

        if let Some(Some(gj)) = values.get(i + 1) {
            if *gj != 0.0 && gi.signum() != gj.signum() {
                if let Some(r) = bisect_root(&g, grid[i], grid[i + 1], gi) {
                    let scale = gi.abs().max(gj.abs()).max(1.0);
                    if g(r).map(|v| v.abs() < 1e-6 * scale).unwrap_or(false) {
                        roots.push(r);
                    }
                }
            }
        }

        if i > 0 && i + 1 < grid.len() {
            if let (Some(prev), Some(next)) = (values[i - 1], values[i + 1]) {
                let local_min = gi.abs() < prev.abs() && gi.abs() < next.abs();
                let same_sign = prev.signum() == gi.signum() && next.signum() == gi.signum();
                let resolved = prev.abs().min(next.abs()) > TOUCH_FLOOR;
                if local_min && same_sign && resolved && gi.abs() < 1e-2 {
                    if let Some(r) = golden_min_abs(&g, grid[i - 1], grid[i + 1]) {
                        if g(r).map(|v| v.abs() < 1e-10).unwrap_or(false) {
                            roots.push(r);
                        }
                    }
                }
            }
        }
    }

    roots.sort_by(|a, b| a.total_cmp(b));
    roots.dedup_by(|a, b| (*a - *b).abs() < ROOT_MERGE);
    roots
}

/// Snap roots and drop duplicates created by snapping.
pub fn snap_all(values: &[f64]) -> Vec<Snapped> {
    let mut out: Vec<Snapped> = values.iter().map(|&v| snap(v)).collect();
    out.dedup_by(|a, b| (a.value - b.value).abs() < ROOT_MERGE);
    out
}

/// An infinite arithmetic family `offset + period·n, n ∈ ℤ`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicFamily {
    pub offset: Snapped,
    pub period: Snapped,
}

impl PeriodicFamily {
    /// The family members that fall within `[lo, hi]`.
    pub fn members_within(&self, lo: f64, hi: f64) -> Vec<f64> {
        let p = self.period.value;
        let first = ((lo - self.offset.value) / p).ceil() as i64;
        let last = ((hi - self.offset.value) / p).floor() as i64;
        (first..=last)
            .map(|n| self.offset.value + n as f64 * p)
            .collect()
    }

    pub fn contains(&self, v: f64) -> bool {
        let n = ((v - self.offset.value) / self.period.value).round();
        (self.offset.value + n * self.period.value - v).abs() < 1e-7
    }
}

impl fmt::Display for PeriodicFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = if self.period.repr == "1" {
            "n".to_string()
        } else {
            format!("{}·n", self.period)
        };
        if self.offset.value == 0.0 {
            f.write_str(&step)
        } else {
            write!(f, "{} + {}", self.offset, step)
        }
    }
}

/// Detect whether a sorted list of roots is periodic.
///
/// Only roots inside [-10, 10] are inspected, where the grid is fine enough
/// not to skip any. Returns one family per residue class.
pub fn detect_periodic(roots: &[f64]) -> Option<Vec<PeriodicFamily>> {
    let inner: Vec<f64> = roots.iter().copied().filter(|r| r.abs() <= 10.0).collect();
    if roots.len() <= MAX_LISTED || inner.len() < 6 {
        return None;
    }

    for stride in 1..=4usize {
        if inner.len() < stride * 3 {
            break;
        }
        let period = inner[stride] - inner[0];
        if period <= 0.0 {
            continue;
        }
        let regular = inner
            .windows(stride + 1)
            .all(|w| ((w[stride] - w[0]) - period).abs() < 1e-6);
        if !regular {
            continue;
        }

        let period = snap(period);
        let families = (0..stride)
            .map(|k| {
                // smallest non-negative representative
                let raw = inner[k];
                let shift = (raw / period.value + 1e-7).floor();
                let offset = snap(raw - shift * period.value);
                PeriodicFamily {
                    offset,
                    period: period.clone(),
                }
            })
            .collect::<Vec<_>>();

        let mut families = families;
        families.sort_by(|a, b| a.offset.value.total_cmp(&b.offset.value));
        return Some(families);
    }

    None
}

/// The behavior of a function when approaching a point or infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    /// Values settle on a finite limit.
    Converges(f64),
    /// Values grow without bound with the given sign.
    Diverges(f64),
    /// Values keep oscillating; `unbounded` when the swing itself blows up.
    Oscillates { unbounded: bool },
    /// The function is not defined near the point.
    Undefined,
}

/// Classify samples taken ever closer to the target. The last three samples
/// must be equally spaced on a log scale.
fn classify(samples: &[f64]) -> Approach {
    if samples.len() < 3 || samples.iter().any(|v| v.is_nan()) {
        return Approach::Undefined;
    }

    let n = samples.len();
    let last = samples[n - 1];
    if last.is_infinite() {
        return Approach::Diverges(last.signum());
    }
    if samples.iter().any(|v| v.is_infinite()) {
        return Approach::Oscillates { unbounded: true };
    }

    let diffs: Vec<f64> = samples.windows(2).map(|w| w[1] - w[0]).collect();
    let increasing = diffs.iter().all(|d| *d >= 0.0);
    let decreasing = diffs.iter().all(|d| *d <= 0.0);
    let (a, b) = (samples[n - 3], samples[n - 2]);
    let (d1, d2) = (b - a, last - b);

    if d2 == 0.0 {
        return Approach::Converges(last);
    }

    if increasing || decreasing {
        let ratio = d2 / d1;
        if d1 != 0.0 && ratio.abs() < 0.8 && d2.abs() < 1e-3 * last.abs().max(1.0) {
            // Aitken extrapolation of a geometrically converging tail
            return Approach::Converges(last + d2 * ratio / (1.0 - ratio));
        }
        return Approach::Diverges(if increasing { 1.0 } else { -1.0 });
    }

    if d2.abs() < 1e-6 * last.abs().max(1.0) {
        return Approach::Converges(last);
    }

    let swing = samples.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let mixed_sign = samples.iter().any(|v| *v > 0.0) && samples.iter().any(|v| *v < 0.0);
    Approach::Oscillates {
        unbounded: mixed_sign && swing > 1e5,
    }
}

/// Behavior of `f` as x → +∞ (`direction` = 1) or -∞ (`direction` = -1).
///
/// `f` returns NaN where it is undefined.
pub fn approach_infinity(f: &impl Fn(f64) -> f64, direction: f64) -> Approach {
    let points = [1e2, 1e3, 1e4, 1e6, 1e8, 1e10, 1e12];
    let samples: Vec<f64> = points.iter().map(|p| f(direction * p)).collect();
    classify(&samples)
}

/// Behavior of `f` as x → `point` from the side given by `side` (±1).
pub fn approach_point(f: &impl Fn(f64) -> f64, point: f64, side: f64) -> Approach {
    let offsets = [1e-2, 1e-3, 1e-4, 1e-6, 1e-8, 1e-10];
    let scale = point.abs().max(1.0);
    let samples: Vec<f64> = offsets.iter().map(|h| f(point + side * h * scale)).collect();
    classify(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_sorted_and_symmetric() {
        let grid = scan_grid();
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(grid.first().copied(), Some(-SCAN_LIMIT));
        assert_eq!(grid.last().copied(), Some(SCAN_LIMIT));
        assert!(grid.contains(&0.0));
    }

    #[test]
    fn test_snap_forms() {
        assert_eq!(snap(2.000000001).repr, "2");
        assert_eq!(snap(-0.5).repr, "-1/2");
        assert_eq!(snap(PI / 2.0).repr, "pi/2");
        assert_eq!(snap(-PI).repr, "-pi");
        assert_eq!(snap(3.0 * PI / 4.0).repr, "3*pi/4");
        assert_eq!(snap(2f64.sqrt()).repr, "sqrt(2)");
        assert_eq!(snap(-(3f64.sqrt())).repr, "-sqrt(3)");
        assert_eq!(snap(0.123456789).repr, "0.123457");
        assert_eq!(snap(-1e-12).repr, "0");
    }

    #[test]
    fn test_find_roots_simple_and_touching() {
        let grid = scan_grid();
        let roots = find_roots(|x| Some(x * x - 1.0), &grid);
        let snapped: Vec<_> = snap_all(&roots).into_iter().map(|s| s.repr).collect();
        assert_eq!(snapped, vec!["-1", "1"]);

        let roots = find_roots(|x| Some((x - 0.333) * (x - 0.333)), &grid);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.333).abs() < 1e-4);
    }

    #[test]
    fn test_find_roots_ignores_poles() {
        let grid = scan_grid();
        let roots = find_roots(|x| Some(1.0 / (x - 0.005)), &grid);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_find_roots_skips_underflowed_tails() {
        let grid = scan_grid();
        // sech(x)^2 underflows to exactly 0 for large |x|
        let roots = find_roots(|x| Some(1.0 / x.cosh().powi(2)), &grid);
        assert!(roots.is_empty(), "{:?}", roots);

        // 1 - tanh(x)^2 cancels to 0 long before it underflows
        let roots = find_roots(|x| Some(1.0 - x.tanh().powi(2)), &grid);
        assert!(roots.is_empty(), "{:?}", roots);

        let roots = find_roots(|x| Some(x * (-x * x).exp()), &grid);
        assert_eq!(roots, vec![0.0]);
    }

    #[test]
    fn test_unit_period_prints_as_n() {
        let family = PeriodicFamily {
            offset: snap(0.0),
            period: snap(1.0),
        };
        assert_eq!(family.to_string(), "n");
    }

    #[test]
    fn test_detect_periodic_cosine_roots() {
        let grid = scan_grid();
        let roots = find_roots(|x| Some(x.cos()), &grid);
        let families = detect_periodic(&roots).unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].to_string(), "pi/2 + pi·n");
    }

    #[test]
    fn test_approach_classification() {
        let exp = |x: f64| x.exp();
        assert_eq!(approach_infinity(&exp, -1.0), Approach::Converges(0.0));
        assert_eq!(approach_infinity(&exp, 1.0), Approach::Diverges(1.0));

        let log = |x: f64| if x > 0.0 { x.ln() } else { f64::NAN };
        assert_eq!(approach_point(&log, 0.0, 1.0), Approach::Diverges(-1.0));
        assert_eq!(approach_point(&log, 0.0, -1.0), Approach::Undefined);
        assert_eq!(approach_infinity(&log, 1.0), Approach::Diverges(1.0));

        let sqrt = |x: f64| x.sqrt();
        match approach_point(&sqrt, 0.0, 1.0) {
            Approach::Converges(v) => assert!(v.abs() < 1e-7),
            other => panic!("unexpected {:?}", other),
        }

        let sin = |x: f64| x.sin();
        assert!(matches!(
            approach_infinity(&sin, 1.0),
            Approach::Oscillates { unbounded: false }
        ));
    }
}
