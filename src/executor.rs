// src/executor.rs
//! Motion executor (spec component C5): drives the input sink with
//! uniform inter-point pacing, and the drag state machine. Grounded in
//! `SystemCursor._execute_curve_movement` and `WebAdjuster._execute_movement`
//! of the original.
use tracing::debug;

use crate::error::CursorResult;
use crate::geometry::{Button, Point};
use crate::sink::{InputSink, WebSink};
use crate::trajectory::Trajectory;

/// Consumes a trajectory and a duration, emitting `move_absolute` for
/// each point with dwell `duration / len`, then a final correcting
/// `move_absolute(destination)`.
pub fn execute(sink: &mut impl InputSink, trajectory: &Trajectory, destination: Point, duration: f64) -> CursorResult<()> {
    let points = trajectory.points();
    if points.is_empty() {
        return Err(crate::error::CursorError::DegenerateCurve);
    }

    let dwell = duration / points.len() as f64;
    for point in points {
        sink.move_absolute(*point)?;
        if dwell > 0.0 {
            sink.sleep(dwell);
        }
    }
    sink.move_absolute(destination)?;
    Ok(())
}

/// Web-path variant: the sink only accepts integer relative offsets, so
/// fractional-pixel residue is accumulated across axes and flushed
/// lazily, preserving: sum(emitted offsets) == floor(destination - origin).
pub fn execute_web(
    sink: &mut impl WebSink,
    trajectory: &Trajectory,
    origin: Point,
    duration: f64,
) -> CursorResult<(i64, i64)> {
    let points = trajectory.points();
    if points.is_empty() {
        return Err(crate::error::CursorError::DegenerateCurve);
    }

    let dwell = duration / points.len() as f64;
    let mut cursor = origin;
    let mut residue = (0.0f64, 0.0f64);
    let mut total_offset = (0i64, 0i64);

    for point in points {
        let dx = point.x - cursor.x;
        let dy = point.y - cursor.y;
        residue.0 += dx - dx.trunc();
        residue.1 += dy - dy.trunc();

        let mut flush_x = dx.trunc() as i64;
        let mut flush_y = dy.trunc() as i64;
        if residue.0.abs() >= 1.0 {
            let whole = residue.0.trunc() as i64;
            flush_x += whole;
            residue.0 -= whole as f64;
        }
        if residue.1.abs() >= 1.0 {
            let whole = residue.1.trunc() as i64;
            flush_y += whole;
            residue.1 -= whole as f64;
        }

        if flush_x != 0 || flush_y != 0 {
            sink.move_by_offset(flush_x, flush_y)?;
            total_offset.0 += flush_x;
            total_offset.1 += flush_y;
        }

        cursor = *point;
        if dwell > 0.0 {
            sink.sleep(dwell);
        }
    }

    let residual_x = residue.0.round() as i64;
    let residual_y = residue.1.round() as i64;
    if residual_x != 0 || residual_y != 0 {
        sink.move_by_offset(residual_x, residual_y)?;
        total_offset.0 += residual_x;
        total_offset.1 += residual_y;
    }

    Ok(total_offset)
}

/// Drag-and-drop state machine: `idle -> moved_to_source -> pressed ->
/// moved_to_target -> released -> idle`. The `pressed` transition must
/// not emit additional `move_absolute` before the registration delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    MovedToSource,
    Pressed,
    MovedToTarget,
    Released,
}

pub struct DragSequence {
    state: DragState,
}

impl DragSequence {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn arrive_at_source(&mut self) -> CursorResult<()> {
        self.assert_state(DragState::Idle)?;
        self.state = DragState::MovedToSource;
        Ok(())
    }

    /// Presses the button, then blocks for `registration_delay_seconds`
    /// before any further `move_absolute` is permitted.
    pub fn press(&mut self, sink: &mut impl InputSink, button: Button, registration_delay_seconds: f64) -> CursorResult<()> {
        self.assert_state(DragState::MovedToSource)?;
        sink.press(button)?;
        debug!(delay = registration_delay_seconds, "holding for button registration");
        sink.sleep(registration_delay_seconds);
        self.state = DragState::Pressed;
        Ok(())
    }

    pub fn arrive_at_target(&mut self) -> CursorResult<()> {
        self.assert_state(DragState::Pressed)?;
        self.state = DragState::MovedToTarget;
        Ok(())
    }

    pub fn release(&mut self, sink: &mut impl InputSink, button: Button) -> CursorResult<()> {
        self.assert_state(DragState::MovedToTarget)?;
        sink.release(button)?;
        self.state = DragState::Released;
        Ok(())
    }

    fn assert_state(&self, expected: DragState) -> CursorResult<()> {
        if self.state != expected {
            return Err(crate::error::CursorError::invalid(format!(
                "drag sequence in state {:?}, expected {:?}",
                self.state, expected
            )));
        }
        Ok(())
    }
}

impl Default for DragSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    #[test]
    fn drag_state_machine_rejects_out_of_order_transitions() {
        let mut drag = DragSequence::new();
        let mut sink = NullSink::new(Point::new(0.0, 0.0), (800.0, 600.0));
        assert!(drag.press(&mut sink, Button::Left, 0.05).is_err());
        drag.arrive_at_source().unwrap();
        drag.press(&mut sink, Button::Left, 0.0).unwrap();
        assert_eq!(drag.state(), DragState::Pressed);
        drag.arrive_at_target().unwrap();
        drag.release(&mut sink, Button::Left).unwrap();
        assert_eq!(drag.state(), DragState::Released);
    }

    #[test]
    fn execute_emits_every_point_then_corrects_to_destination() {
        let mut sink = NullSink::new(Point::new(0.0, 0.0), (800.0, 600.0));
        let trajectory = crate::trajectory::build(
            &mut rand::rng(),
            &crate::params::CurveParams {
                offset_boundary_x: 10,
                offset_boundary_y: 10,
                knots_count: 1,
                distortion_mean: 1.0,
                distortion_stdev: 0.0,
                distortion_frequency: 0.0,
                easing: crate::easing::Easing::Linear,
                target_points: 8,
            },
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            12.0,
        )
        .unwrap();

        execute(&mut sink, &trajectory, Point::new(100.0, 50.0), 0.0).unwrap();
        assert_eq!(sink.position().unwrap(), Point::new(100.0, 50.0));
    }
}
