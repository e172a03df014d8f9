//! # assuan-client
//!
//! Client for the Assuan line protocol spoken by GnuPG-family agents
//! over a Unix domain socket, with:
//! - Byte-exact wire framing (linefeed-terminated ASCII lines)
//! - Binary-safe percent encoding for raw data payloads
//! - Incremental line reassembly across arbitrary transport chunking
//! - Event-driven request/response sequencing, one exchange at a time
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! │        (builds commands, interprets responses)               │
//! └──────────┬──────────────────────────────────▲───────────────┘
//!            │ encode                           │ decode
//! ┌──────────▼──────────────────────────────────┴───────────────┐
//! │                        Codec                                 │
//! │     (commands, percent-coded data, typed responses)          │
//! └──────────┬──────────────────────────────────▲───────────────┘
//!            │ line + LF                        │ complete lines
//! ┌──────────▼───────────────┐   ┌──────────────┴───────────────┐
//! │         Client           │   │      Line Reassembler        │
//! │   (one Unix socket,      │◄──┤   (chunk stream → lines)     │
//! │    half-duplex turns)    │   └──────────────────────────────┘
//! └──────────┬───────────────┘
//!            │
//!            ▼
//!      agent process
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use assuan_client::{AssuanClient, Command, decode_response, encode_command};
//!
//! # fn main() -> assuan_client::Result<()> {
//! let client = AssuanClient::open("/run/user/1000/gnupg/S.gpg-agent")?;
//!
//! client.send(&encode_command(&Command::new("NOP")?))?;
//! let line = client.receive()?;
//! let response = decode_response(&line)?;
//! assert!(response.is_ok());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AssuanError, Result};
pub use config::Config;
pub use network::{AssuanClient, ConnectionState};
pub use protocol::{
    classify, decode_response, encode_command, encode_data, Command, Response, ResponseKind,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
