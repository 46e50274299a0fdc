// src/lib.rs
//! Human-like cursor trajectory engine: Bezier path generation,
//! velocity-scaled distortion, and Fitts'-Law timing, composed behind a
//! small high-level API in [`cursor`].
pub mod bezier;
pub mod config;
pub mod cursor;
pub mod duration;
pub mod easing;
pub mod error;
pub mod executor;
pub mod geometry;
pub mod params;
pub mod recording;
pub mod sink;
pub mod trajectory;

pub use config::CursorConfig;
pub use cursor::Cursor;
pub use error::{CursorError, CursorResult};
pub use geometry::{Button, DurationSpec, ElementRect, Point, RelativePosition, Target};
pub use sink::{InputSink, NullSink, NullWebSink, WebSink};
