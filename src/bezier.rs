// src/bezier.rs
//! Bezier curve evaluator (spec component C1).
//!
//! Pure function, no side effects: given control points, evaluate the
//! Bernstein-polynomial curve at evenly spaced parameter values.
use std::collections::HashMap;

use crate::geometry::Point;

/// Binomial coefficient cache keyed by (n, k), filled lazily via the
/// symmetric Pascal recurrence C(n,k) = C(n,k-1) * (n-k+1) / k.
#[derive(Debug, Default)]
pub struct BinomialCache {
    cache: HashMap<(usize, usize), u64>,
}

impl BinomialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns "n choose k", caching the result for reuse across calls.
    pub fn get(&mut self, n: usize, k: usize) -> u64 {
        if k > n {
            return 0;
        }
        if k == 0 || k == n {
            return 1;
        }
        let k = k.min(n - k);
        if let Some(&cached) = self.cache.get(&(n, k)) {
            return cached;
        }
        let mut result: u64 = 1;
        for i in 0..k {
            result = result * (n - i) as u64 / (i + 1) as u64;
        }
        self.cache.insert((n, k), result);
        result
    }

    /// Precompute every binomial coefficient C(n, i) for i in 0..=n.
    fn coefficients_for_degree(&mut self, n: usize) -> Vec<u64> {
        (0..=n).map(|i| self.get(n, i)).collect()
    }
}

/// Degree-n Bernstein basis value at parameter `t`, bypassing `powf` for
/// the small exponents (0 and 1) that dominate low-knot-count curves.
fn bernstein_point(t: f64, i: usize, n: usize, binomial_coeff: u64) -> f64 {
    let t_pow = match i {
        0 => 1.0,
        1 => t,
        _ => t.powi(i as i32),
    };
    let exp = n - i;
    let one_minus_t_pow = match exp {
        0 => 1.0,
        1 => 1.0 - t,
        _ => (1.0 - t).powi(exp as i32),
    };
    binomial_coeff as f64 * t_pow * one_minus_t_pow
}

/// Evaluate the Bezier curve described by `points` at parameter `t` in [0, 1].
pub fn evaluate(cache: &mut BinomialCache, points: &[Point], t: f64) -> Point {
    let n = points.len() - 1;
    let coeffs = cache.coefficients_for_degree(n);
    let mut x = 0.0;
    let mut y = 0.0;
    for (i, point) in points.iter().enumerate() {
        let bern = bernstein_point(t, i, n, coeffs[i]);
        x += point.x * bern;
        y += point.y * bern;
    }
    Point::new(x, y)
}

/// Returns `m` samples of the Bezier curve through `points`, equidistant
/// in parameter space (tk = k / (m - 1)). For m < 2, returns the raw
/// control points truncated to m — numerically stable for n <= ~20, the
/// spec's upper bound on knot count.
pub fn calculate_points_in_curve(m: usize, points: &[Point]) -> Vec<Point> {
    if m < 2 {
        return points.iter().take(m).copied().collect();
    }
    let mut cache = BinomialCache::new();
    (0..m)
        .map(|k| {
            let t = k as f64 / (m - 1) as f64;
            evaluate(&mut cache, points, t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_binomial(n: u64, k: u64) -> u64 {
        fn factorial(n: u64) -> u64 {
            (1..=n).product::<u64>().max(1)
        }
        if k > n {
            0
        } else {
            factorial(n) / (factorial(k) * factorial(n - k))
        }
    }

    #[test]
    fn binomial_matches_reference_for_n_up_to_20() {
        let mut cache = BinomialCache::new();
        for n in 0..=20usize {
            for k in 0..=n {
                assert_eq!(
                    cache.get(n, k),
                    reference_binomial(n as u64, k as u64),
                    "mismatch at n={n} k={k}"
                );
            }
        }
    }

    #[test]
    fn linear_curve_is_a_straight_line() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 20.0);
        let samples = calculate_points_in_curve(5, &[p0, p1]);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], p0);
        assert_eq!(samples[4], p1);
        let mid = samples[2];
        assert!((mid.x - 5.0).abs() < 1e-9);
        assert!((mid.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_two_points_returns_truncated_controls() {
        let points = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)];
        assert_eq!(calculate_points_in_curve(0, &points), Vec::<Point>::new());
        assert_eq!(calculate_points_in_curve(1, &points), vec![points[0]]);
    }

    #[test]
    fn endpoints_are_preserved_for_higher_degree_curve() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 40.0),
            Point::new(12.0, -5.0),
            Point::new(20.0, 20.0),
        ];
        let samples = calculate_points_in_curve(50, &points);
        assert_eq!(samples.first().copied(), Some(points[0]));
        assert_eq!(samples.last().copied(), Some(points[3]));
    }
}
