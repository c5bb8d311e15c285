//! Gauge value mapping primitives
//!
//! Every dial score in the crate funnels through the two functions here:
//! - `clamp_score` rounds and clamps a raw curve output into the dial range
//! - `piecewise_linear` interpolates over a set of (x, y) anchors
//!
//! No other module implements interpolation.

/// Round to the nearest integer and clamp into the 0-100 dial range.
///
/// Rounding is half-away-from-zero (the `f64::round` convention).
pub fn clamp_score(x: f64) -> u8 {
    x.round().clamp(0.0, 100.0) as u8
}

/// Evaluate a piecewise-linear curve defined by `anchors` at `x`.
///
/// Anchors do not need to be pre-sorted; they are sorted by x internally.
/// Outside the anchor range the curve extrapolates flat: below the lowest
/// anchor it returns that anchor's y, above the highest it returns that
/// anchor's y. A zero-width segment (two anchors sharing an x) yields the
/// lower anchor's y instead of dividing by zero.
pub fn piecewise_linear(x: f64, anchors: &[(f64, f64)]) -> f64 {
    let mut points = anchors.to_vec();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let Some(&(first_x, first_y)) = points.first() else {
        return 0.0;
    };
    let (last_x, last_y) = points[points.len() - 1];

    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x >= x0 && x <= x1 {
            if x1 == x0 {
                return y0;
            }
            let t = (x - x0) / (x1 - x0);
            return y0 + (y1 - y0) * t;
        }
    }

    last_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(0.0), 0);
        assert_eq!(clamp_score(100.0), 100);
        assert_eq!(clamp_score(150.0), 100);
    }

    #[test]
    fn test_clamp_score_rounds_half_away_from_zero() {
        assert_eq!(clamp_score(49.5), 50);
        assert_eq!(clamp_score(49.4), 49);
        assert_eq!(clamp_score(0.5), 1);
    }

    #[test]
    fn test_clamp_score_idempotent() {
        for x in [-10.0, 0.0, 0.4, 49.5, 72.3, 100.0, 250.0] {
            let once = clamp_score(x);
            assert_eq!(clamp_score(once as f64), once);
        }
    }

    #[test]
    fn test_piecewise_hits_anchors_exactly() {
        // deliberately unsorted input
        let anchors = [(2.0, 52.0), (0.0, 95.0), (4.0, 5.0), (1.0, 70.0), (3.0, 25.0)];
        for (x, y) in anchors {
            assert_eq!(piecewise_linear(x, &anchors), y);
        }
    }

    #[test]
    fn test_piecewise_flat_extrapolation() {
        let anchors = [(12.0, 100.0), (18.0, 65.0), (45.0, 30.0)];
        assert_eq!(piecewise_linear(-100.0, &anchors), 100.0);
        assert_eq!(piecewise_linear(5.0, &anchors), 100.0);
        assert_eq!(piecewise_linear(45.0, &anchors), 30.0);
        assert_eq!(piecewise_linear(1000.0, &anchors), 30.0);
    }

    #[test]
    fn test_piecewise_interpolates_midpoint() {
        let anchors = [(0.0, 30.0), (6.0, 70.0)];
        let y = piecewise_linear(3.0, &anchors);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_piecewise_degenerate_segment() {
        let anchors = [(0.0, 10.0), (1.0, 20.0), (1.0, 40.0), (2.0, 60.0)];
        // evaluating at the shared x returns the lower anchor's y
        assert_eq!(piecewise_linear(1.0, &anchors), 20.0);
        // segments on either side still interpolate
        assert!((piecewise_linear(0.5, &anchors) - 15.0).abs() < 1e-9);
        assert!((piecewise_linear(1.5, &anchors) - 50.0).abs() < 1e-9);
    }
}
