// src/easing.rs
//! Tween function pool (spec §4.2 step 2, §9 "Tween function pool").
//!
//! The original selects a Python callable uniformly from a fixed list;
//! here easings are an enumerated set plus a registry mapping each
//! variant to a pure `f64 -> f64` function, so selection stays a plain
//! uniform draw over the enum rather than function-pointer juggling.
use std::f64::consts::PI;

use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

/// The 13 named easings from the curve generator's tween pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseOutQuart,
    EaseOutQuint,
    EaseOutExpo,
    EaseOutCirc,
    EaseOutSine,
    EaseInOutCubic,
    EaseInOutQuart,
    EaseInOutQuint,
    EaseInOutExpo,
    EaseInOutCirc,
    EaseInOutSine,
}

/// Matches the original's 13-entry `tween_options` list exactly.
const ALL_EASINGS: [Easing; 13] = [
    Easing::EaseOutExpo,
    Easing::EaseInOutQuint,
    Easing::EaseInOutSine,
    Easing::EaseInOutQuart,
    Easing::EaseInOutExpo,
    Easing::EaseInOutCubic,
    Easing::EaseInOutCirc,
    Easing::Linear,
    Easing::EaseOutSine,
    Easing::EaseOutQuart,
    Easing::EaseOutQuint,
    Easing::EaseOutCubic,
    Easing::EaseOutCirc,
];

impl Distribution<Easing> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Easing {
        ALL_EASINGS[rng.random_range(0..ALL_EASINGS.len())]
    }
}

impl Easing {
    /// Uniform draw from the fixed pool.
    pub fn sample(rng: &mut impl Rng) -> Easing {
        rng.random()
    }

    /// Apply the easing to `p` in [0, 1], returning a value in [0, 1].
    pub fn apply(self, p: f64) -> f64 {
        match self {
            Easing::Linear => p,
            Easing::EaseOutCubic => 1.0 - (1.0 - p).powi(3),
            Easing::EaseOutQuart => 1.0 - (1.0 - p).powi(4),
            Easing::EaseOutQuint => 1.0 - (1.0 - p).powi(5),
            Easing::EaseOutExpo => {
                if p >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * p)
                }
            }
            Easing::EaseOutCirc => (1.0 - (p - 1.0).powi(2)).max(0.0).sqrt(),
            Easing::EaseOutSine => ((p * PI) / 2.0).sin(),
            Easing::EaseInOutCubic => {
                if p < 0.5 {
                    4.0 * p.powi(3)
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInOutQuart => {
                if p < 0.5 {
                    8.0 * p.powi(4)
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInOutQuint => {
                if p < 0.5 {
                    16.0 * p.powi(5)
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseInOutExpo => {
                if p <= 0.0 {
                    0.0
                } else if p >= 1.0 {
                    1.0
                } else if p < 0.5 {
                    2f64.powf(20.0 * p - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * p + 10.0)) / 2.0
                }
            }
            Easing::EaseInOutCirc => {
                if p < 0.5 {
                    (1.0 - (1.0 - (2.0 * p).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * p + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }
            Easing::EaseInOutSine => -((PI * p).cos() - 1.0) / 2.0,
        }
    }
}
