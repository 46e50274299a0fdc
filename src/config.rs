// src/config.rs - tunables for the cursor engine, loaded from TOML the
// way the teacher project loads `printer.toml`.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A (low, high) inclusive integer range, matching the original's
/// `OFFSET_BOUNDARY_RANGE_{LOW,MID,HIGH}` tuples.
pub type IntRange = (u32, u32);

/// Tunables for the trajectory engine. Defaults reproduce every constant
/// named in the spec and in `humancursor/constants.py`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorConfig {
    pub steady: bool,

    pub offset_boundary_ranges: Vec<IntRange>,
    pub offset_boundary_weights: Vec<f64>,

    pub steady_offset_boundary: u32,
    pub steady_distortion_mean: f64,
    pub steady_distortion_stdev: f64,
    pub steady_distortion_frequency: f64,

    pub default_target_size: f64,
    pub minimum_target_size: f64,

    pub fitts_a_range: (f64, f64),
    pub fitts_b_range: (f64, f64),
    pub duration_variance_range: (f64, f64),
    pub min_duration: f64,
    pub max_duration: f64,

    pub fatigue_window_seconds: f64,
    pub fatigue_rate_per_window: f64,
    pub fatigue_cap: f64,

    pub pre_click_pause_range: (f64, f64),
    pub inter_click_pause_range: (f64, f64),
    pub drag_press_delay_seconds: f64,

    pub idle_jitter_rate_per_second: u32,
    pub idle_jitter_max_offset_px: f64,

    pub recent_target_size_window: usize,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            steady: false,
            offset_boundary_ranges: vec![(20, 45), (45, 75), (75, 100)],
            offset_boundary_weights: vec![0.20, 0.65, 0.15],
            steady_offset_boundary: 10,
            steady_distortion_mean: 1.2,
            steady_distortion_stdev: 1.2,
            steady_distortion_frequency: 1.0,
            default_target_size: 12.0,
            minimum_target_size: 5.0,
            fitts_a_range: (0.08, 0.12),
            fitts_b_range: (0.12, 0.18),
            duration_variance_range: (0.75, 1.30),
            min_duration: 0.15,
            max_duration: 3.0,
            fatigue_window_seconds: 120.0,
            fatigue_rate_per_window: 0.01,
            fatigue_cap: 0.15,
            pre_click_pause_range: (0.05, 0.15),
            inter_click_pause_range: (0.170, 0.280),
            drag_press_delay_seconds: 0.05,
            idle_jitter_rate_per_second: 10,
            idle_jitter_max_offset_px: 3.0,
            recent_target_size_window: 5,
        }
    }
}

impl CursorConfig {
    /// Loads configuration from a TOML file. Missing fields fall back to
    /// `Default::default()` per-field via `#[serde(default)]`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_ref.display().to_string(),
            source,
        })
    }
}
