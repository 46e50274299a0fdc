// src/sink.rs
//! External input-sink collaborators (spec §6). The only portability
//! seam: capture/emission of actual OS or browser events lives outside
//! this crate, behind these traits.
use tracing::{debug, trace};

use crate::error::{CursorError, CursorResult};
use crate::geometry::{Button, Point};

/// Opaque collaborator exposing the primitive operations a motion
/// executor needs. No ownership of the underlying device state.
pub trait InputSink {
    fn screen_size(&self) -> CursorResult<(f64, f64)>;
    fn position(&self) -> CursorResult<Point>;
    fn move_absolute(&mut self, point: Point) -> CursorResult<()>;
    fn press(&mut self, button: Button) -> CursorResult<()>;
    fn release(&mut self, button: Button) -> CursorResult<()>;
    fn sleep(&self, seconds: f64);
}

/// A web adapter accepts only integer relative offsets and exposes an
/// `execute_script` escape hatch for bounding-rect queries and smooth
/// scroll-into-view (spec §6).
pub trait WebSink: InputSink {
    fn get_window_size(&self) -> CursorResult<(f64, f64)>;
    fn move_by_offset(&mut self, dx: i64, dy: i64) -> CursorResult<()>;
    fn scroll_into_view(&mut self, selector: &str) -> CursorResult<()>;
}

/// A no-op sink used by the demo binary and by tests that only need to
/// observe what the executor *would* emit. Tracks position locally so
/// the endpoint-preservation invariant (spec §8.1) is still checkable.
#[derive(Debug)]
pub struct NullSink {
    position: Point,
    screen_size: (f64, f64),
    emitted: Vec<Point>,
}

impl NullSink {
    pub fn new(start: Point, screen_size: (f64, f64)) -> Self {
        Self {
            position: start,
            screen_size,
            emitted: Vec::new(),
        }
    }

    pub fn emitted_points(&self) -> &[Point] {
        &self.emitted
    }
}

impl InputSink for NullSink {
    fn screen_size(&self) -> CursorResult<(f64, f64)> {
        if self.screen_size.0 <= 0.0 || self.screen_size.1 <= 0.0 {
            return Err(CursorError::SinkUnavailable {
                message: "screen size is non-positive".into(),
            });
        }
        Ok(self.screen_size)
    }

    fn position(&self) -> CursorResult<Point> {
        Ok(self.position)
    }

    fn move_absolute(&mut self, point: Point) -> CursorResult<()> {
        trace!(x = point.x, y = point.y, "move_absolute");
        self.position = point;
        self.emitted.push(point);
        Ok(())
    }

    fn press(&mut self, button: Button) -> CursorResult<()> {
        debug!(?button, "press");
        Ok(())
    }

    fn release(&mut self, button: Button) -> CursorResult<()> {
        debug!(?button, "release");
        Ok(())
    }

    fn sleep(&self, seconds: f64) {
        trace!(seconds, "sleep (no-op sink: skipped)");
    }
}

/// A no-op [`WebSink`], analogous to [`NullSink`] but for the web
/// adapter path: tracks position through integer pixel offsets the way
/// a real browser automation driver would.
#[derive(Debug)]
pub struct NullWebSink {
    position: Point,
    screen_size: (f64, f64),
    scrolled_into_view: Vec<String>,
}

impl NullWebSink {
    pub fn new(start: Point, screen_size: (f64, f64)) -> Self {
        Self {
            position: start,
            screen_size,
            scrolled_into_view: Vec::new(),
        }
    }

    pub fn scrolled_into_view(&self) -> &[String] {
        &self.scrolled_into_view
    }
}

impl InputSink for NullWebSink {
    fn screen_size(&self) -> CursorResult<(f64, f64)> {
        if self.screen_size.0 <= 0.0 || self.screen_size.1 <= 0.0 {
            return Err(CursorError::SinkUnavailable {
                message: "screen size is non-positive".into(),
            });
        }
        Ok(self.screen_size)
    }

    fn position(&self) -> CursorResult<Point> {
        Ok(self.position)
    }

    fn move_absolute(&mut self, point: Point) -> CursorResult<()> {
        trace!(x = point.x, y = point.y, "move_absolute");
        self.position = point;
        Ok(())
    }

    fn press(&mut self, button: Button) -> CursorResult<()> {
        debug!(?button, "press");
        Ok(())
    }

    fn release(&mut self, button: Button) -> CursorResult<()> {
        debug!(?button, "release");
        Ok(())
    }

    fn sleep(&self, seconds: f64) {
        trace!(seconds, "sleep (no-op sink: skipped)");
    }
}

impl WebSink for NullWebSink {
    fn get_window_size(&self) -> CursorResult<(f64, f64)> {
        self.screen_size()
    }

    fn move_by_offset(&mut self, dx: i64, dy: i64) -> CursorResult<()> {
        trace!(dx, dy, "move_by_offset");
        self.position = Point::new(self.position.x + dx as f64, self.position.y + dy as f64);
        Ok(())
    }

    fn scroll_into_view(&mut self, selector: &str) -> CursorResult<()> {
        debug!(selector, "scroll_into_view");
        self.scrolled_into_view.push(selector.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_tracks_position() {
        let mut sink = NullSink::new(Point::new(0.0, 0.0), (1920.0, 1080.0));
        sink.move_absolute(Point::new(10.0, 20.0)).unwrap();
        assert_eq!(sink.position().unwrap(), Point::new(10.0, 20.0));
        assert_eq!(sink.emitted_points().len(), 1);
    }

    #[test]
    fn non_positive_screen_size_is_sink_unavailable() {
        let sink = NullSink::new(Point::new(0.0, 0.0), (0.0, 1080.0));
        assert!(matches!(
            sink.screen_size(),
            Err(CursorError::SinkUnavailable { .. })
        ));
    }

    #[test]
    fn null_web_sink_accumulates_relative_offsets() {
        let mut sink = NullWebSink::new(Point::new(0.0, 0.0), (1280.0, 800.0));
        sink.move_by_offset(5, -3).unwrap();
        sink.move_by_offset(2, 2).unwrap();
        assert_eq!(sink.position().unwrap(), Point::new(7.0, -1.0));
    }

    #[test]
    fn null_web_sink_tracks_scroll_into_view_calls() {
        let mut sink = NullWebSink::new(Point::new(0.0, 0.0), (1280.0, 800.0));
        sink.scroll_into_view("#submit").unwrap();
        assert_eq!(sink.scrolled_into_view(), &["#submit".to_string()]);
    }
}
