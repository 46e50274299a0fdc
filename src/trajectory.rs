// src/trajectory.rs
//! Trajectory builder (spec component C3).
//!
//! Pure function of parameters + RNG: knots -> Bezier sample -> distort
//! -> tween -> overshoot -> pauses. Grounded in
//! `HumanizeMouseTrajectory.generate_curve` and its helper methods in
//! the original's `human_curve_generator.py`.
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::bezier;
use crate::error::{CursorError, CursorResult};
use crate::geometry::Point;
use crate::params::CurveParams;

/// Finite, non-empty ordered sequence of points. First point is
/// approximately `origin`; last point equals `destination` after
/// rounding. Length invariants are documented on [`build`].
#[derive(Debug, Clone)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn axis_aligned_bounds(origin: Point, destination: Point, boundary_x: u32, boundary_y: u32) -> (f64, f64, f64, f64) {
    let left = origin.x.min(destination.x) - boundary_x as f64;
    let right = origin.x.max(destination.x) + boundary_x as f64;
    let bottom = origin.y.min(destination.y) - boundary_y as f64;
    let top = origin.y.max(destination.y) + boundary_y as f64;
    (left, right, bottom, top)
}

/// (a) Internal-knot generation: inflate the bounding box, wobble each
/// edge by +-5%, then sample `knots_count` interior points uniformly.
fn generate_internal_knots(rng: &mut impl Rng, params: &CurveParams, origin: Point, destination: Point) -> Vec<Point> {
    let (mut left, mut right, mut bottom, mut top) =
        axis_aligned_bounds(origin, destination, params.offset_boundary_x, params.offset_boundary_y);

    left *= 1.0 + rng.random_range(-0.05..0.05);
    right *= 1.0 + rng.random_range(-0.05..0.05);
    bottom *= 1.0 + rng.random_range(-0.05..0.05);
    top *= 1.0 + rng.random_range(-0.05..0.05);
    if left > right {
        std::mem::swap(&mut left, &mut right);
    }
    if bottom > top {
        std::mem::swap(&mut bottom, &mut top);
    }

    (0..params.knots_count)
        .map(|_| {
            let x = if (right - left).abs() < f64::EPSILON {
                left
            } else {
                rng.random_range(left..right)
            };
            let y = if (top - bottom).abs() < f64::EPSILON {
                bottom
            } else {
                rng.random_range(bottom..top)
            };
            Point::new(x, y)
        })
        .collect()
}

/// (b) Sample the Bezier curve built from origin + knots + destination.
fn sample_bezier(origin: Point, destination: Point, knots: &[Point]) -> Vec<Point> {
    let m = (origin.x - destination.x)
        .abs()
        .max((origin.y - destination.y).abs())
        .max(2.0) as usize;

    let mut controls = Vec::with_capacity(knots.len() + 2);
    controls.push(origin);
    controls.extend_from_slice(knots);
    controls.push(destination);

    bezier::calculate_points_in_curve(m, &controls)
}

/// (c) Velocity-scaled Gaussian distortion; endpoints preserved exactly.
fn distort(rng: &mut impl Rng, points: &[Point], params: &CurveParams) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut distorted = Vec::with_capacity(points.len());
    distorted.push(points[0]);

    for i in 1..points.len() - 1 {
        let velocity = points[i].distance_to(points[i - 1]);
        let velocity_factor = (1.0 + velocity / 50.0).min(2.5);
        if rng.random_bool(params.distortion_frequency.clamp(0.0, 1.0)) {
            let normal = Normal::new(0.0, params.distortion_stdev * velocity_factor)
                .unwrap_or_else(|_| Normal::new(0.0, 1e-9).unwrap());
            let dx = normal.sample(rng);
            let dy = normal.sample(rng);
            distorted.push(Point::new(points[i].x + dx, points[i].y + dy));
        } else {
            distorted.push(points[i]);
        }
    }
    distorted.push(points[points.len() - 1]);
    distorted
}

/// (d) Re-sample to `target_points`, applying directional easing and a
/// cubic jerk-minimization window at both ends of the path.
fn tween(points: &[Point], params: &CurveParams, origin: Point, destination: Point) -> Vec<Point> {
    let target_points = params.target_points.max(2);
    let horizontal_dominant = (destination.x - origin.x).abs() > (destination.y - origin.y).abs();
    let exponent = if horizontal_dominant { 0.95 } else { 1.05 };

    (0..target_points)
        .map(|i| {
            let base = i as f64 / (target_points - 1) as f64;
            let mut p = params.easing.apply(base.powf(exponent));

            if i < 3 {
                let smooth = (i as f64 / 3.0).powi(3);
                p *= smooth;
            } else if i > target_points.saturating_sub(4) {
                let remaining = (target_points - 1 - i) as f64 / 3.0;
                let smooth = remaining.powi(3);
                p = 1.0 - smooth * (1.0 - p);
            }

            let index = (p * (points.len() - 1) as f64).floor() as usize;
            points[index.min(points.len() - 1)]
        })
        .collect()
}

/// (e) Overshoot injection: past-the-destination excursion that the
/// tail of the path naturally corrects.
fn inject_overshoot(rng: &mut impl Rng, points: &mut Vec<Point>, origin: Point, destination: Point, distance: f64, target_size: f64) {
    let distance_factor = (distance / 1000.0).min(1.0);
    let target_factor = ((50.0 - target_size) / 50.0).max(0.0);
    let overshoot_prob = ((distance_factor + target_factor) / 2.0).min(0.4);

    if rng.random_bool(overshoot_prob) {
        let factor = rng.random_range(1.03..1.08);
        let injection_idx = (points.len() as f64 * rng.random_range(0.80..0.90)) as usize;
        let direction = Point::new(destination.x - origin.x, destination.y - origin.y);
        let overshoot_point = Point::new(
            destination.x + direction.x * (factor - 1.0),
            destination.y + direction.y * (factor - 1.0),
        );
        let idx = injection_idx.min(points.len());
        points.insert(idx, overshoot_point);
    }
}

/// (f) Pause injection: duplicate a handful of points to simulate dwell.
fn inject_pauses(rng: &mut impl Rng, points: &mut Vec<Point>, distance: f64) {
    if distance < 300.0 || points.len() < 10 {
        return;
    }

    let num_pauses: u32 = if distance < 500.0 {
        *[0u32, 1].get(rng.random_range(0..2)).unwrap()
    } else {
        *[1u32, 2].get(rng.random_range(0..2)).unwrap()
    };
    if num_pauses == 0 {
        return;
    }

    let safe_start = (points.len() as f64 * 0.10) as usize;
    let safe_end = (points.len() as f64 * 0.80) as usize;
    if safe_end <= safe_start {
        return;
    }

    let mut candidates: Vec<usize> = (safe_start..safe_end).collect();
    let count = (num_pauses as usize).min(candidates.len());
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = rng.random_range(0..candidates.len());
        chosen.push(candidates.remove(idx));
    }
    chosen.sort_unstable();

    let mut offset = 0usize;
    for idx in chosen {
        let pause_length = rng.random_range(2..=4usize);
        let pause_point = points[idx + offset];
        for _ in 0..pause_length {
            points.insert(idx + offset, pause_point);
        }
        offset += pause_length;
    }
}

/// Builds the full trajectory from `origin` to `destination` per spec §4.3.
pub fn build(
    rng: &mut impl Rng,
    params: &CurveParams,
    origin: Point,
    destination: Point,
    target_size: f64,
) -> CursorResult<Trajectory> {
    let distance = origin.distance_to(destination);

    let knots = generate_internal_knots(rng, params, origin, destination);
    let sampled = sample_bezier(origin, destination, &knots);
    let distorted = distort(rng, &sampled, params);
    let mut tweened = tween(&distorted, params, origin, destination);

    inject_overshoot(rng, &mut tweened, origin, destination, distance, target_size);
    inject_pauses(rng, &mut tweened, distance);

    // The tweener can carry a slightly off destination through rounding;
    // pin the endpoints exactly, matching the spec's endpoint invariant.
    if let Some(first) = tweened.first_mut() {
        *first = origin;
    }
    if let Some(last) = tweened.last_mut() {
        *last = destination;
    }

    if tweened.is_empty() {
        return Err(CursorError::DegenerateCurve);
    }

    Ok(Trajectory { points: tweened })
}
