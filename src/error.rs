// src/error.rs
use thiserror::Error;

/// Error taxonomy for the cursor trajectory engine (spec §7).
///
/// No exceptions are used for control flow inside the engine; every
/// surfaced error carries the failing parameter(s).
#[derive(Debug, Error)]
pub enum CursorError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("input sink unavailable: {message}")]
    SinkUnavailable { message: String },

    #[error("point ({x}, {y}) is outside the page")]
    OutOfBounds { x: f64, y: f64 },

    #[error("trajectory builder produced an empty point list")]
    DegenerateCurve,
}

impl CursorError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CursorError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type CursorResult<T> = Result<T, CursorError>;
