// src/geometry.rs - screen-space points and the tagged sums replacing the
// original's dynamically-typed point/duration/target arguments.
use serde::{Deserialize, Serialize};

/// A point in screen-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn rounded(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

impl From<(f64, f64)> for Point {
    fn from(pair: (f64, f64)) -> Self {
        Point::new(pair.0, pair.1)
    }
}

/// Mouse button identifiers for the input sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// Bounding rectangle of a web element, top-left origin in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Relative position inside an element, each axis in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
}

/// Movement target, replacing the original's interchangeable
/// list/tuple/element arguments with an explicit tagged sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Absolute screen coordinates.
    Absolute(Point),
    /// Offset relative to the cursor's current position.
    Offset(Point),
    /// A web element rect plus an optional fixed relative position
    /// (`None` draws a beta-distributed point inside the element).
    Element(ElementRect, Option<RelativePosition>),
}

/// Requested movement duration, replacing the original's
/// `int | float | list | tuple | None` overload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationSpec {
    /// Derive duration from the Fitts'-Law model (§4.4 of the spec).
    Auto,
    /// Use this exact duration in seconds.
    Fixed(f64),
    /// Drag-and-drop only: distinct durations for the two legs.
    Split(f64, f64),
}
