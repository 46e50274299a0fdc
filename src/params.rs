// src/params.rs
//! Parameter selector (spec component C2).
//!
//! From (origin, destination, viewport, steady-flag) chooses curvature
//! boundaries, knot count, distortion parameters, easing, and sample
//! count. Grounded in `generate_random_curve_parameters` /
//! `calculate_edge_proximity` of the original's
//! `calculate_and_randomize.py`.
use rand::Rng;

use crate::config::CursorConfig;
use crate::easing::Easing;
use crate::error::{CursorError, CursorResult};
use crate::geometry::Point;

/// Per-movement curve parameters produced by the selector.
#[derive(Debug, Clone, Copy)]
pub struct CurveParams {
    pub offset_boundary_x: u32,
    pub offset_boundary_y: u32,
    pub knots_count: u32,
    /// Accepted and threaded through for compatibility with the original
    /// API; the distortion step centres noise at 0 and ignores this.
    pub distortion_mean: f64,
    pub distortion_stdev: f64,
    pub distortion_frequency: f64,
    pub easing: Easing,
    pub target_points: usize,
}

fn quantize(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Edge-proximity scalar: 0 at viewport centre, 1 at the edge.
fn edge_proximity(point: Point, width: f64, height: f64) -> f64 {
    let x_proximity = (2.0 * point.x.min(width - point.x) / width).clamp(0.0, f64::MAX);
    let y_proximity = (2.0 * point.y.min(height - point.y) / height).clamp(0.0, f64::MAX);
    (1.0 - x_proximity.min(y_proximity)).clamp(0.0, 1.0)
}

fn weighted_choice<'a, T>(rng: &mut impl Rng, items: &'a [T], weights: &[f64]) -> &'a T {
    let total: f64 = weights.iter().sum();
    let mut roll = rng.random_range(0.0..total);
    for (item, weight) in items.iter().zip(weights) {
        if roll < *weight {
            return item;
        }
        roll -= *weight;
    }
    items.last().expect("weighted_choice requires a non-empty slice")
}

fn pick_offset_boundary(rng: &mut impl Rng, config: &CursorConfig) -> u32 {
    let range = *weighted_choice(
        rng,
        &config.offset_boundary_ranges,
        &config.offset_boundary_weights,
    );
    rng.random_range(range.0..=range.1)
}

fn pick_knots_count(rng: &mut impl Rng, distance: f64) -> u32 {
    let t1 = rng.random_range(80.0..120.0);
    let t2 = rng.random_range(400.0..600.0);
    if distance < t1 {
        *weighted_choice(rng, &[1u32, 2], &[0.65, 0.35])
    } else if distance < t2 {
        *weighted_choice(rng, &[2u32, 3, 4], &[0.45, 0.40, 0.15])
    } else {
        *weighted_choice(rng, &[3u32, 4, 5, 6], &[0.35, 0.40, 0.18, 0.07])
    }
}

fn pick_target_points(distance: f64) -> usize {
    let raw = if distance < 50.0 {
        (0.3 * distance).floor().max(10.0)
    } else if distance < 100.0 {
        (0.5 * distance).floor().max(15.0)
    } else if distance < 500.0 {
        (60.0 + 40.0 * (distance / 100.0).log2()).floor()
    } else {
        (100.0 + 50.0 * (distance / 500.0).log2()).floor()
    };
    raw.min(250.0).max(2.0) as usize
}

/// Selects curve parameters for a movement from `origin` to `destination`
/// within a `(width, height)` viewport. When `steady` is set, curvature
/// deterministically collapses to the fixed "straight-ish" preset.
pub fn select(
    rng: &mut impl Rng,
    config: &CursorConfig,
    origin: Point,
    destination: Point,
    viewport: (f64, f64),
) -> CursorResult<CurveParams> {
    let (width, height) = viewport;
    if width <= 0.0 || height <= 0.0 {
        return Err(CursorError::invalid(format!(
            "viewport must be positive, got ({width}, {height})"
        )));
    }
    if destination.x < 0.0 || destination.x > width || destination.y < 0.0 || destination.y > height {
        return Err(CursorError::OutOfBounds {
            x: destination.x,
            y: destination.y,
        });
    }

    let distance = origin.distance_to(destination);
    let easing = Easing::sample(rng);

    let origin_proximity = edge_proximity(origin, width, height);
    let dest_proximity = edge_proximity(destination, width, height);
    let max_proximity = origin_proximity.max(dest_proximity);

    if config.steady {
        let knots_count = pick_knots_count(rng, distance);
        let knots_count = (((knots_count as f64) * (1.0 - 0.5 * max_proximity)).floor() as u32).max(1);
        return Ok(CurveParams {
            offset_boundary_x: config.steady_offset_boundary,
            offset_boundary_y: config.steady_offset_boundary,
            knots_count,
            distortion_mean: config.steady_distortion_mean,
            distortion_stdev: config.steady_distortion_stdev,
            distortion_frequency: config.steady_distortion_frequency,
            easing,
            target_points: pick_target_points(distance),
        });
    }

    let mut offset_boundary_x = pick_offset_boundary(rng, config);
    let mut offset_boundary_y = pick_offset_boundary(rng, config);
    let mut knots_count = pick_knots_count(rng, distance);

    let mut distortion_mean = quantize(rng.random_range(0.80..1.10));
    let mut distortion_stdev = quantize(rng.random_range(0.85..1.10));
    let mut distortion_frequency = quantize(rng.random_range(0.25..0.70));

    if distance < 30.0 {
        distortion_stdev *= 0.4;
        distortion_frequency *= 0.5;
    } else if distance < 75.0 {
        distortion_stdev *= 0.7;
        distortion_frequency *= 0.8;
    }

    let target_points = pick_target_points(distance);

    offset_boundary_x = ((offset_boundary_x as f64) * (1.0 - 0.7 * max_proximity)).floor() as u32;
    offset_boundary_y = ((offset_boundary_y as f64) * (1.0 - 0.7 * max_proximity)).floor() as u32;
    knots_count = (((knots_count as f64) * (1.0 - 0.5 * max_proximity)).floor() as u32).max(1);

    Ok(CurveParams {
        offset_boundary_x,
        offset_boundary_y,
        knots_count,
        distortion_mean,
        distortion_stdev,
        distortion_frequency,
        easing,
        target_points,
    })
}
