//! Error types for the LUMAR client

use thiserror::Error;

use crate::SessionId;

/// Client-wide error taxonomy
#[derive(Error, Debug)]
pub enum LumarError {
    // Session precondition violations
    #[error("A capture session is already active")]
    SessionAlreadyActive,

    #[error("No ambient light sample available yet")]
    AmbientLightUnavailable,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    // Sensor availability
    #[error("Camera or depth sensor cannot currently produce a frame")]
    SensorUnavailable,

    // Inbound wire errors
    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Unknown message header: {0:#04x}")]
    UnknownMessageHeader(u8),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    // Transport errors
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// Result type for LUMAR operations
pub type LumarResult<T> = Result<T, LumarError>;
