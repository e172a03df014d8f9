//! Protocol Module
//!
//! Defines the wire protocol for talking to the agent.
//!
//! ## Protocol Format (line-oriented, ASCII)
//!
//! Every message is one line terminated by a linefeed byte.
//!
//! ### Request Lines
//! - `<command>[ <parameters>]` - generic command
//! - `D <percent-encoded-bytes>` - raw data chunk
//!
//! ### Response Lines
//! - `OK[ <message>]` - success
//! - `ERR <code>[ <description>]` - failure, numeric code
//! - `S <keyword> <text>` - status information or inquiry
//! - `# <comment>` - comment, informational only
//! - `D <percent-encoded-bytes>` - raw data chunk
//!
//! Binary payloads travel on `D` lines, percent-encoded byte-wise so the
//! line framing survives any payload content.

mod command;
mod response;
mod codec;
mod reassembler;

pub use command::Command;
pub use response::{Response, ResponseKind};
pub use codec::{
    classify, decode_response, encode_command, encode_data, percent_decode, percent_encode,
    LINE_TERMINATOR,
};
pub use reassembler::{LineReassembler, DEFAULT_MAX_LINE_LEN};
