//! Line reassembler
//!
//! Turns an arbitrarily chunked byte stream into complete lines.
//!
//! The transport delivers chunks of whatever size the kernel hands over;
//! a chunk boundary can fall anywhere, including mid-line. The
//! reassembler keeps partial-line bytes across calls and only ever emits
//! lines that were actually terminated. It never assumes a delivery
//! aligns with one or more complete lines.

use bytes::BytesMut;

use crate::error::{AssuanError, Result};
use super::codec::LINE_TERMINATOR;

/// Default upper bound on a single unterminated line (1 MiB)
pub const DEFAULT_MAX_LINE_LEN: usize = 1024 * 1024;

/// Incremental chunk-to-line parser
pub struct LineReassembler {
    /// Bytes received but not yet terminated
    buf: BytesMut,

    /// Accumulator bound; a peer that never terminates a line would
    /// otherwise grow the buffer without limit
    max_line_len: usize,
}

impl LineReassembler {
    /// Create a reassembler with the default line length limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a reassembler with an explicit line length limit
    pub fn with_limit(max_line_len: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_line_len,
        }
    }

    /// Feed one transport chunk, returning every line it completes
    ///
    /// Lines are returned oldest first with the terminator stripped.
    /// Bytes after the last terminator stay buffered for the next call;
    /// they are never discarded or emitted early. Exceeding the line
    /// length limit without a terminator is a framing error.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == LINE_TERMINATOR) {
            let mut line = self.buf.split_to(pos + 1);
            line.truncate(pos); // drop the terminator
            lines.push(line.to_vec());
        }

        if self.buf.len() > self.max_line_len {
            return Err(AssuanError::Framing(format!(
                "unterminated line exceeds maximum length of {} bytes",
                self.max_line_len
            )));
        }

        Ok(lines)
    }

    /// Number of buffered bytes awaiting a terminator
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for LineReassembler {
    fn default() -> Self {
        Self::new()
    }
}
