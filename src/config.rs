//! Configuration for the Assuan client
//!
//! Centralized configuration with sensible defaults.

use crate::protocol::DEFAULT_MAX_LINE_LEN;

/// Configuration for a client instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Size of the buffer used for each socket read (in bytes)
    pub read_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Framing Configuration
    // -------------------------------------------------------------------------
    /// Maximum length of a single unterminated line (in bytes)
    ///
    /// Bounds the reassembler's accumulator against a peer that never
    /// sends a line terminator. Exceeding it is a framing error.
    pub max_line_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_buffer_size: 4096,
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the socket read buffer size (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the maximum unterminated line length (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
