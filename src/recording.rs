// src/recording.rs
//! Session recording format (§11 supplemented feature, not present in
//! the distilled spec but present in the original's `record` module):
//! a serializable log of high-level cursor operations, re-playable or
//! re-emitted as a script. Two encodings share one event type: `bincode`
//! for a compact on-disk blob, `serde_json` for a human-diffable form.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to encode recording: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode recording: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("failed to serialize recording to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single high-level action, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordedEvent {
    Move { x: f64, y: f64 },
    Click { x: f64, y: f64, clicks: u32 },
    Drag { from_x: f64, from_y: f64, to_x: f64, to_y: f64 },
}

impl RecordedEvent {
    pub fn r#move(point: Point) -> Self {
        RecordedEvent::Move { x: point.x, y: point.y }
    }

    pub fn click(point: Point, clicks: u32) -> Self {
        RecordedEvent::Click { x: point.x, y: point.y, clicks }
    }

    pub fn drag(from: Point, to: Point) -> Self {
        RecordedEvent::Drag {
            from_x: from.x,
            from_y: from.y,
            to_x: to.x,
            to_y: to.y,
        }
    }
}

/// An ordered log of events captured during a session. Append-only from
/// the recorder's point of view; the format itself has no notion of
/// time, since replay re-derives timing from the same duration model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub events: Vec<RecordedEvent>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RecordedEvent) {
        self.events.push(event);
    }

    /// Compact binary encoding for on-disk storage, via bincode's serde
    /// compatibility layer.
    pub fn to_bincode(&self) -> Result<Vec<u8>, RecordingError> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, RecordingError> {
        let (recording, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(recording)
    }

    /// Human-diffable JSON form, suitable for checking into a repo
    /// alongside a test fixture.
    pub fn to_json(&self) -> Result<String, RecordingError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, RecordingError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recording() -> Recording {
        let mut recording = Recording::new();
        recording.push(RecordedEvent::r#move(Point::new(10.0, 20.0)));
        recording.push(RecordedEvent::click(Point::new(30.0, 40.0), 2));
        recording.push(RecordedEvent::drag(Point::new(0.0, 0.0), Point::new(100.0, 100.0)));
        recording
    }

    #[test]
    fn bincode_round_trips() {
        let recording = sample_recording();
        let bytes = recording.to_bincode().unwrap();
        let decoded = Recording::from_bincode(&bytes).unwrap();
        assert_eq!(recording, decoded);
    }

    #[test]
    fn json_round_trips() {
        let recording = sample_recording();
        let text = recording.to_json().unwrap();
        let decoded = Recording::from_json(&text).unwrap();
        assert_eq!(recording, decoded);
    }

    #[test]
    fn empty_recording_round_trips() {
        let recording = Recording::new();
        let bytes = recording.to_bincode().unwrap();
        assert_eq!(Recording::from_bincode(&bytes).unwrap(), recording);
    }
}
