//! Command definitions
//!
//! Represents outbound requests to the agent.

use crate::error::{AssuanError, Result};

/// A command to send to the agent
///
/// Immutable once constructed. Neither the name nor the parameters may
/// contain a line terminator; construction enforces this because an
/// embedded terminator would silently corrupt the framing of every
/// subsequent exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command name (e.g. "NOP", "GETINFO", "SIGN")
    name: String,

    /// Optional parameter text, sent verbatim after the name
    parameters: Option<String>,
}

impl Command {
    /// Create a command without parameters
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_line_safe("command name", &name)?;

        Ok(Self {
            name,
            parameters: None,
        })
    }

    /// Create a command with parameter text
    ///
    /// Parameters are not escaped; the caller is responsible for
    /// protocol-valid content.
    pub fn with_parameters(
        name: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let parameters = parameters.into();
        validate_line_safe("command name", &name)?;
        validate_line_safe("command parameters", &parameters)?;

        Ok(Self {
            name,
            parameters: Some(parameters),
        })
    }

    /// Get the command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parameter text, if any
    pub fn parameters(&self) -> Option<&str> {
        self.parameters.as_deref()
    }
}

/// Reject text that would break single-line framing
///
/// A linefeed terminates the line early; a carriage return would change
/// framing for peers that accept CRLF. Both are rejected.
fn validate_line_safe(what: &str, text: &str) -> Result<()> {
    if text.contains('\n') || text.contains('\r') {
        return Err(AssuanError::Framing(format!(
            "{} must not contain a line terminator",
            what
        )));
    }
    Ok(())
}
