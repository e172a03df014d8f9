//! Error types for the Assuan client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::protocol::ResponseKind;

/// Result type alias using AssuanError
pub type Result<T> = std::result::Result<T, AssuanError>;

/// Unified error type for Assuan client operations
#[derive(Debug, Error)]
pub enum AssuanError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Connection-level failure raised by the transport thread.
    ///
    /// These are queued when they occur and surfaced on the next `send`
    /// or `receive` call, so visibility is delayed by up to one call.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Client is not connected")]
    NotConnected,

    #[error("Client is already connected")]
    AlreadyConnected,

    #[error("Client is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Framing error: {0}")]
    Framing(String),

    // -------------------------------------------------------------------------
    // Response Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Unknown response type: {0}")]
    UnknownResponseType(String),

    #[error("Response parse error: {0}")]
    ResponseParse(String),

    #[error("Response type mismatch: expected {expected:?}, got {actual:?}")]
    ResponseTypeMismatch {
        expected: ResponseKind,
        actual: ResponseKind,
    },
}
