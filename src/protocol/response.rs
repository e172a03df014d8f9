//! Response definitions
//!
//! Typed interpretation of lines received from the agent.

use crate::error::{AssuanError, Result};

/// Response classification tag
///
/// One tag per recognized line prefix: `OK`, `ERR`, `S`, `#`, `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Ok,
    Error,
    Status,
    Comment,
    Data,
}

/// A decoded response line
///
/// Decoded exactly once from the raw line into a tagged value; the
/// accessors below fail with a type-mismatch error instead of being
/// re-checked against the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `OK[ <message>]` - success, with optional human-readable message
    Ok { message: Option<String> },

    /// `ERR <code>[ <description>]` - failure with a numeric error code
    Error {
        code: u32,
        description: Option<String>,
    },

    /// `S <keyword> <text>` - status information, or an inquiry
    ///
    /// The wire format does not distinguish a status line from an
    /// inquiry; both arrive with the `S` prefix. Which one it is depends
    /// on the protocol state the caller is tracking, which is why both
    /// `as_information` and `as_inquire` accept this variant.
    Status { keyword: String, text: String },

    /// `# <comment>` - informational only, may be ignored
    Comment { text: String },

    /// `D <data>` - raw data chunk, percent-decoded back to bytes
    Data { payload: Vec<u8> },
}

impl Response {
    /// Get the classification tag
    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Ok { .. } => ResponseKind::Ok,
            Response::Error { .. } => ResponseKind::Error,
            Response::Status { .. } => ResponseKind::Status,
            Response::Comment { .. } => ResponseKind::Comment,
            Response::Data { .. } => ResponseKind::Data,
        }
    }

    /// True for `OK` lines
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }

    /// True for `ERR` lines
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Get the success message, if present
    ///
    /// Fails with a type mismatch unless this is an `OK` response.
    pub fn as_ok(&self) -> Result<Option<&str>> {
        match self {
            Response::Ok { message } => Ok(message.as_deref()),
            other => Err(mismatch(ResponseKind::Ok, other)),
        }
    }

    /// Get the error code and optional description
    ///
    /// Fails with a type mismatch unless this is an `ERR` response.
    pub fn as_error(&self) -> Result<(u32, Option<&str>)> {
        match self {
            Response::Error { code, description } => Ok((*code, description.as_deref())),
            other => Err(mismatch(ResponseKind::Error, other)),
        }
    }

    /// Interpret an `S` line as status information: (keyword, text)
    pub fn as_information(&self) -> Result<(&str, &str)> {
        match self {
            Response::Status { keyword, text } => Ok((keyword, text)),
            other => Err(mismatch(ResponseKind::Status, other)),
        }
    }

    /// Interpret an `S` line as an inquiry: (keyword, parameters)
    ///
    /// Parses identically to `as_information`; the inquire/status
    /// distinction is a caller-side protocol-state decision, not a wire
    /// marker.
    pub fn as_inquire(&self) -> Result<(&str, &str)> {
        match self {
            Response::Status { keyword, text } => Ok((keyword, text)),
            other => Err(mismatch(ResponseKind::Status, other)),
        }
    }

    /// Get the comment text
    ///
    /// Fails with a type mismatch unless this is a `#` response.
    pub fn as_comment(&self) -> Result<&str> {
        match self {
            Response::Comment { text } => Ok(text),
            other => Err(mismatch(ResponseKind::Comment, other)),
        }
    }

    /// Get the raw data payload
    ///
    /// Fails with a type mismatch unless this is a `D` response.
    pub fn as_data(&self) -> Result<&[u8]> {
        match self {
            Response::Data { payload } => Ok(payload),
            other => Err(mismatch(ResponseKind::Data, other)),
        }
    }
}

fn mismatch(expected: ResponseKind, actual: &Response) -> AssuanError {
    AssuanError::ResponseTypeMismatch {
        expected,
        actual: actual.kind(),
    }
}
