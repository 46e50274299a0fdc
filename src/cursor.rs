// src/cursor.rs
//! High-level API (spec component C6): `move_to`, `click`,
//! `drag_and_drop`, `idle_jitter`. Grounded in `SystemCursor` /
//! `WebAdjuster` of the original, composing C2-C5.
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution};
use tracing::{info, warn};

use crate::config::CursorConfig;
use crate::duration::{self, SessionContext};
use crate::error::{CursorError, CursorResult};
use crate::executor::{self, DragSequence};
use crate::geometry::{Button, DurationSpec, ElementRect, Point, RelativePosition, Target};
use crate::params;
use crate::sink::{InputSink, WebSink};
use crate::trajectory::{self, Trajectory};

/// Process-wide guard forbidding overlapping cursor instances against
/// the same sink (spec §5: "a configuration race... the contract
/// forbids it"). Scoped acquisition mirrors the teacher's snapshot /
/// restore pattern for global hardware configuration.
static CURSOR_ACTIVE: AtomicBool = AtomicBool::new(false);

/// A scoped cursor instance. On construction it acquires the
/// process-wide guard; on drop it releases it, guaranteeing restoration
/// on every exit path including early returns and panics.
pub struct Cursor<S: InputSink> {
    sink: S,
    config: CursorConfig,
    session: SessionContext,
    rng: StdRng,
}

impl<S: InputSink> Cursor<S> {
    /// Builds a cursor with the default thread-seeded RNG.
    pub fn new(sink: S, config: CursorConfig) -> CursorResult<Self> {
        Self::with_rng(sink, config, StdRng::from_os_rng())
    }

    /// Builds a cursor with an injected RNG, for deterministic property
    /// tests (spec §5, §9 "RNG injection").
    pub fn with_rng(sink: S, config: CursorConfig, rng: StdRng) -> CursorResult<Self> {
        if CURSOR_ACTIVE.swap(true, Ordering::AcqRel) {
            return Err(CursorError::invalid(
                "a Cursor instance is already active against this process; nested instances are forbidden",
            ));
        }
        let recent_target_size_window = config.recent_target_size_window;
        Ok(Self {
            sink,
            config,
            session: SessionContext::new(recent_target_size_window),
            rng,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn resolve_target(&mut self, target: Target) -> CursorResult<Point> {
        let current = self.sink.position()?;
        match target {
            Target::Absolute(point) => Ok(point),
            Target::Offset(offset) => Ok(Point::new(current.x + offset.x, current.y + offset.y)),
            Target::Element(rect, relative) => Ok(self.resolve_element_point(rect, relative)),
        }
    }

    /// Beta(alpha, alpha)-distributed point inside an element rect,
    /// center-biased and tighter for small elements (spec §6).
    fn resolve_element_point(&mut self, rect: ElementRect, relative: Option<RelativePosition>) -> Point {
        if let Some(relative) = relative {
            return Point::new(rect.x + rect.width * relative.x, rect.y + rect.height * relative.y);
        }
        let alpha = 2.0 + (rect.area() / 10000.0).min(3.0);
        let beta = Beta::new(alpha, alpha).expect("alpha is always > 0");
        let fx: f64 = beta.sample(&mut self.rng);
        let fy: f64 = beta.sample(&mut self.rng);
        Point::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
    }

    fn build_trajectory(&mut self, origin: Point, destination: Point, target_size: f64) -> CursorResult<Trajectory> {
        let viewport = self.sink.screen_size()?;
        let curve_params = params::select(&mut self.rng, &self.config, origin, destination, viewport)?;
        trajectory::build(&mut self.rng, &curve_params, origin, destination, target_size)
    }

    fn resolve_duration(&mut self, origin: Point, destination: Point, duration: DurationSpec, target_size: f64) -> f64 {
        match duration {
            DurationSpec::Fixed(seconds) => seconds,
            DurationSpec::Auto => {
                duration::compute(&mut self.rng, &self.config, &mut self.session, origin, destination, target_size)
            }
            DurationSpec::Split(first, _second) => first,
        }
    }

    /// Moves the cursor to `target`. `duration = Auto` uses the Fitts'
    /// Law model (C4).
    pub fn move_to(&mut self, target: Target, duration: DurationSpec, target_size: f64) -> CursorResult<()> {
        if target_size <= 0.0 {
            return Err(CursorError::invalid(format!("target_size must be positive, got {target_size}")));
        }
        let origin = self.sink.position()?;
        let destination = self.resolve_target(target)?;

        let trajectory = self.build_trajectory(origin, destination, target_size);
        let trajectory = match trajectory {
            Ok(t) => t,
            Err(CursorError::OutOfBounds { .. }) if matches!(target, Target::Element(..)) => {
                warn!("destination out of bounds, retrying directly at element center");
                if let Target::Element(rect, _) = target {
                    let center = rect.center();
                    self.sink.move_absolute(center)?;
                    return Ok(());
                }
                unreachable!()
            }
            Err(e) => return Err(e),
        };

        let seconds = self.resolve_duration(origin, destination, duration, target_size);
        info!(x = destination.x, y = destination.y, seconds, "move_to");
        executor::execute(&mut self.sink, &trajectory, destination, seconds)
    }

    /// `move_to` followed by a humanized click sequence (spec §4.6).
    pub fn click(&mut self, target: Target, clicks: u32, click_duration: f64, steady_override: Option<bool>) -> CursorResult<()> {
        if clicks == 0 {
            return Err(CursorError::invalid("clicks must be a positive integer, got 0"));
        }
        if click_duration < 0.0 {
            return Err(CursorError::invalid(format!(
                "click_duration must be non-negative, got {click_duration}"
            )));
        }

        let previous_steady = self.config.steady;
        if let Some(steady) = steady_override {
            self.config.steady = steady;
        }
        let move_result = self.move_to(target, DurationSpec::Auto, self.config.default_target_size);
        self.config.steady = previous_steady;
        move_result?;

        let pre_click_pause = self
            .rng
            .random_range(self.config.pre_click_pause_range.0..self.config.pre_click_pause_range.1);
        self.sink.sleep(pre_click_pause);

        for _ in 0..clicks {
            self.sink.press(Button::Left)?;
            self.sink.sleep(click_duration);
            self.sink.release(Button::Left)?;
            let inter_click = self
                .rng
                .random_range(self.config.inter_click_pause_range.0..self.config.inter_click_pause_range.1);
            self.sink.sleep(inter_click);
        }
        Ok(())
    }

    /// Drag-and-drop through the `idle -> moved_to_source -> pressed ->
    /// moved_to_target -> released -> idle` state machine.
    pub fn drag_and_drop(&mut self, from: Target, to: Target, duration: DurationSpec, steady: bool) -> CursorResult<()> {
        let (first, second) = match duration {
            DurationSpec::Split(a, b) => (DurationSpec::Fixed(a), DurationSpec::Fixed(b)),
            DurationSpec::Fixed(total) => (DurationSpec::Fixed(total / 2.0), DurationSpec::Fixed(total / 2.0)),
            DurationSpec::Auto => (DurationSpec::Auto, DurationSpec::Auto),
        };

        let mut drag = DragSequence::new();
        self.move_to(from, first, self.config.default_target_size)?;
        drag.arrive_at_source()?;
        drag.press(&mut self.sink, Button::Left, self.config.drag_press_delay_seconds)?;

        let previous_steady = self.config.steady;
        self.config.steady = steady;
        let move_result = self.move_to(to, second, self.config.default_target_size);
        self.config.steady = previous_steady;
        move_result?;

        drag.arrive_at_target()?;
        drag.release(&mut self.sink, Button::Left)?;
        Ok(())
    }

    /// Emits 10 micro-movements per second with small per-axis random
    /// offsets, simulating natural hand tremor while idle. `deadline`
    /// is checked each tick so callers can interrupt early.
    pub fn idle_jitter(&mut self, total_seconds: f64, intensity: f64, mut deadline: impl FnMut() -> bool) -> CursorResult<()> {
        if total_seconds <= 0.0 {
            return Err(CursorError::invalid(format!("duration must be positive, got {total_seconds}")));
        }
        let intensity = intensity.clamp(0.5, 2.0);
        let rate = self.config.idle_jitter_rate_per_second.max(1);
        let iterations = (total_seconds * rate as f64).round() as u64;
        let interval = total_seconds / iterations.max(1) as f64;
        let max_offset = self.config.idle_jitter_max_offset_px * intensity;

        for _ in 0..iterations {
            if deadline() {
                break;
            }
            let current = self.sink.position()?;
            let dx = self.rng.random_range(-max_offset..max_offset);
            let dy = self.rng.random_range(-max_offset..max_offset);
            self.sink.move_absolute(Point::new(current.x + dx, current.y + dy))?;
            self.sink.sleep(interval);
        }
        Ok(())
    }
}

impl<S: WebSink> Cursor<S> {
    /// Web-adapter variant of [`Cursor::move_to`]: the underlying sink
    /// only accepts integer relative offsets, so the executor accumulates
    /// fractional-pixel residue across the path (spec §6/§11). Returns
    /// the cumulative integer `(dx, dy)` actually emitted.
    pub fn move_to_web(&mut self, target: Target, duration: DurationSpec, target_size: f64) -> CursorResult<(i64, i64)> {
        if target_size <= 0.0 {
            return Err(CursorError::invalid(format!("target_size must be positive, got {target_size}")));
        }
        let origin = self.sink.position()?;
        let destination = self.resolve_target(target)?;
        let trajectory = self.build_trajectory(origin, destination, target_size)?;
        let seconds = self.resolve_duration(origin, destination, duration, target_size);
        info!(x = destination.x, y = destination.y, seconds, "move_to_web");
        executor::execute_web(&mut self.sink, &trajectory, origin, seconds)
    }
}

impl<S: InputSink> Drop for Cursor<S> {
    fn drop(&mut self) {
        CURSOR_ACTIVE.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{NullSink, NullWebSink};

    fn test_cursor(start: Point) -> Cursor<NullSink> {
        Cursor::with_rng(
            NullSink::new(start, (1920.0, 1080.0)),
            CursorConfig::default(),
            StdRng::seed_from_u64(123),
        )
        .unwrap()
    }

    #[test]
    fn move_to_reaches_destination_exactly() {
        let mut cursor = test_cursor(Point::new(100.0, 100.0));
        cursor
            .move_to(Target::Absolute(Point::new(100.0, 100.0)), DurationSpec::Fixed(0.1), 12.0)
            .unwrap();
        assert_eq!(cursor.sink().position().unwrap(), Point::new(100.0, 100.0));
    }

    #[test]
    fn nested_cursor_instances_are_rejected() {
        let sink_a = NullSink::new(Point::new(0.0, 0.0), (800.0, 600.0));
        let _first = Cursor::with_rng(sink_a, CursorConfig::default(), StdRng::seed_from_u64(1)).unwrap();
        let sink_b = NullSink::new(Point::new(0.0, 0.0), (800.0, 600.0));
        let second = Cursor::with_rng(sink_b, CursorConfig::default(), StdRng::seed_from_u64(2));
        assert!(second.is_err());
    }

    #[test]
    fn zero_clicks_is_invalid_argument() {
        let mut cursor = test_cursor(Point::new(0.0, 0.0));
        let err = cursor
            .click(Target::Absolute(Point::new(10.0, 10.0)), 0, 0.0, None)
            .unwrap_err();
        assert!(matches!(err, CursorError::InvalidArgument { .. }));
    }

    #[test]
    fn drag_and_drop_ends_at_destination() {
        let mut cursor = test_cursor(Point::new(0.0, 0.0));
        cursor
            .drag_and_drop(
                Target::Absolute(Point::new(10.0, 10.0)),
                Target::Absolute(Point::new(200.0, 150.0)),
                DurationSpec::Fixed(0.2),
                false,
            )
            .unwrap();
        assert_eq!(cursor.sink().position().unwrap(), Point::new(200.0, 150.0));
    }

    #[test]
    fn move_to_web_accumulates_whole_pixel_offsets_to_destination() {
        let sink = NullWebSink::new(Point::new(10.0, 10.0), (1280.0, 800.0));
        let mut cursor = Cursor::with_rng(sink, CursorConfig::default(), StdRng::seed_from_u64(55)).unwrap();

        let destination = Point::new(900.0, 450.0);
        let (dx, dy) = cursor
            .move_to_web(Target::Absolute(destination), DurationSpec::Fixed(0.05), 12.0)
            .unwrap();

        assert_eq!(dx, (destination.x - 10.0) as i64);
        assert_eq!(dy, (destination.y - 10.0) as i64);
    }

    #[test]
    fn idle_jitter_respects_deadline() {
        let mut cursor = test_cursor(Point::new(500.0, 500.0));
        let mut ticks = 0;
        cursor
            .idle_jitter(1.0, 1.0, || {
                ticks += 1;
                ticks > 2
            })
            .unwrap();
        assert!(ticks <= 4);
    }
}
