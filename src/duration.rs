// src/duration.rs
//! Fitts'-Law duration model with fatigue and repetition context
//! (spec component C4). Grounded in `_CursorContext` and
//! `_calculate_movement_duration` of the original's `system_cursor.py`.
use std::collections::VecDeque;
use std::time::Instant;

use rand::Rng;

use crate::config::CursorConfig;
use crate::geometry::Point;

/// Per-cursor-instance, process-wide session state. Created on cursor
/// construction, updated on every completed `move_to`, destroyed with
/// the instance.
#[derive(Debug)]
pub struct SessionContext {
    session_start_time: Instant,
    movement_count: u64,
    recent_target_sizes: VecDeque<f64>,
    ring_capacity: usize,
}

impl SessionContext {
    pub fn new(ring_capacity: usize) -> Self {
        Self {
            session_start_time: Instant::now(),
            movement_count: 0,
            recent_target_sizes: VecDeque::with_capacity(ring_capacity),
            ring_capacity,
        }
    }

    fn fatigue_factor(&self, config: &CursorConfig) -> f64 {
        let elapsed = self.session_start_time.elapsed().as_secs_f64();
        1.0 + (elapsed / config.fatigue_window_seconds * config.fatigue_rate_per_window)
            .min(config.fatigue_cap)
    }

    fn repetition_factor(&self) -> f64 {
        if self.movement_count < 3 || self.recent_target_sizes.len() < 3 {
            return 1.0;
        }
        let n = self.recent_target_sizes.len() as f64;
        let mean: f64 = self.recent_target_sizes.iter().sum::<f64>() / n;
        let variance: f64 = self
            .recent_target_sizes
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / n;
        if variance < 100.0 {
            0.85
        } else if variance < 500.0 {
            0.92
        } else {
            1.0
        }
    }

    fn record_movement(&mut self, target_size: f64) {
        self.movement_count += 1;
        self.recent_target_sizes.push_back(target_size);
        while self.recent_target_sizes.len() > self.ring_capacity {
            self.recent_target_sizes.pop_front();
        }
    }

    pub fn movement_count(&self) -> u64 {
        self.movement_count
    }
}

/// Computes movement duration from Fitts' Law and updates `session` for
/// fatigue/repetition tracking (spec §4.4).
pub fn compute(
    rng: &mut impl Rng,
    config: &CursorConfig,
    session: &mut SessionContext,
    origin: Point,
    destination: Point,
    target_size: f64,
) -> f64 {
    let target_width = target_size.max(config.minimum_target_size);
    let distance = origin.distance_to(destination);

    let a = rng.random_range(config.fitts_a_range.0..config.fitts_a_range.1);
    let b = rng.random_range(config.fitts_b_range.0..config.fitts_b_range.1);
    let index_of_difficulty = (distance / target_width + 1.0).log2();
    let base_time = a + b * index_of_difficulty;

    let fatigue = session.fatigue_factor(config);
    let repetition = session.repetition_factor();

    let variance = rng.random_range(config.duration_variance_range.0..config.duration_variance_range.1);
    let duration = (base_time * fatigue * repetition * variance).clamp(config.min_duration, config.max_duration);

    session.record_movement(target_size);
    duration
}
