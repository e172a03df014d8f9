//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ASCII lines terminated by a single linefeed byte. The terminator is
//! appended by the sender at transmission; encoded lines never contain
//! one themselves.
//!
//! ### Request Lines
//! ```text
//! <command>[ <parameters>]     generic command
//! D <percent-encoded-bytes>    raw data chunk
//! ```
//!
//! ### Response Lines
//! ```text
//! OK[ <message>]               success
//! ERR <code>[ <description>]   failure, numeric code
//! S <keyword> <text>           status information or inquiry
//! # <comment>                  comment, informational only
//! D <percent-encoded-bytes>    raw data chunk
//! ```
//!
//! Raw data payloads are percent-encoded byte-wise so any byte sequence,
//! including control bytes and invalid UTF-8, survives as a single line.

use crate::error::{AssuanError, Result};
use super::{Command, Response, ResponseKind};

/// Line terminator byte appended at transmission
pub const LINE_TERMINATOR: u8 = b'\n';

/// Hex digits used for percent escapes
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command to a wire line (without terminator)
///
/// Format: `<name>` or `<name> <parameters>`. Parameters are sent
/// verbatim; `Command` construction already guarantees neither field
/// embeds a line terminator.
pub fn encode_command(command: &Command) -> Vec<u8> {
    match command.parameters() {
        Some(params) => {
            let mut line = Vec::with_capacity(command.name().len() + 1 + params.len());
            line.extend_from_slice(command.name().as_bytes());
            line.push(b' ');
            line.extend_from_slice(params.as_bytes());
            line
        }
        None => command.name().as_bytes().to_vec(),
    }
}

/// Encode a raw data payload to a wire line (without terminator)
///
/// Format: `D <percent-encoded-bytes>`. The payload may contain any byte
/// value; the result is always a single safe ASCII line.
pub fn encode_data(payload: &[u8]) -> Vec<u8> {
    let encoded = percent_encode(payload);

    let mut line = Vec::with_capacity(2 + encoded.len());
    line.extend_from_slice(b"D ");
    line.extend_from_slice(&encoded);
    line
}

// =============================================================================
// Percent Encoding
// =============================================================================

/// Percent-encode arbitrary bytes into safe printable ASCII
///
/// Operates byte-wise: printable ASCII other than `%` passes through,
/// everything else (controls, space, DEL, high bytes, and `%` itself)
/// becomes `%XX` with uppercase hex. Reversible for every possible byte
/// sequence; the payload is never routed through a text encoding.
pub fn percent_encode(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len());

    for &byte in payload {
        if is_safe_byte(byte) {
            out.push(byte);
        } else {
            out.push(b'%');
            out.push(HEX_DIGITS[(byte >> 4) as usize]);
            out.push(HEX_DIGITS[(byte & 0x0F) as usize]);
        }
    }

    out
}

/// Decode percent-encoded bytes back to the original payload
///
/// Inverts `percent_encode` exactly for all byte values. Hex digits are
/// accepted in either case. A truncated escape or a non-hex digit is a
/// framing error.
pub fn percent_decode(encoded: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len());
    let mut pos = 0;

    while pos < encoded.len() {
        let byte = encoded[pos];
        if byte == b'%' {
            if pos + 2 >= encoded.len() {
                return Err(AssuanError::Framing(
                    "truncated percent escape in data line".to_string(),
                ));
            }
            let hi = hex_value(encoded[pos + 1])?;
            let lo = hex_value(encoded[pos + 2])?;
            out.push((hi << 4) | lo);
            pos += 3;
        } else {
            out.push(byte);
            pos += 1;
        }
    }

    Ok(out)
}

/// A byte that may appear verbatim in an encoded data line
fn is_safe_byte(byte: u8) -> bool {
    (0x21..=0x7E).contains(&byte) && byte != b'%'
}

/// Value of a single hex digit
fn hex_value(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => Err(AssuanError::Framing(format!(
            "invalid hex digit 0x{:02x} in percent escape",
            other
        ))),
    }
}

// =============================================================================
// Response Classification
// =============================================================================

/// Classify a response line by its leading prefix token
///
/// Matches the fixed ordered prefix set `OK`, `ERR`, `S`, `#`, `D` at
/// position 0. An alphabetic token only matches when followed by a space
/// or end-of-line, so `OKAY ...` is not an `OK` line. Anything else is a
/// protocol violation.
pub fn classify(line: &[u8]) -> Result<ResponseKind> {
    if starts_with_token(line, b"OK") {
        return Ok(ResponseKind::Ok);
    }
    if starts_with_token(line, b"ERR") {
        return Ok(ResponseKind::Error);
    }
    if starts_with_token(line, b"S") {
        return Ok(ResponseKind::Status);
    }
    if line.first() == Some(&b'#') {
        return Ok(ResponseKind::Comment);
    }
    if starts_with_token(line, b"D") {
        return Ok(ResponseKind::Data);
    }

    Err(AssuanError::UnknownResponseType(line_preview(line)))
}

/// Decode a response line into its typed representation
///
/// Classifies once and parses the variant grammar in the same pass; the
/// returned value is a tagged union, never re-inspected per accessor.
pub fn decode_response(line: &[u8]) -> Result<Response> {
    match classify(line)? {
        ResponseKind::Ok => decode_ok(line),
        ResponseKind::Error => decode_error(line),
        ResponseKind::Status => decode_status(line),
        ResponseKind::Comment => decode_comment(line),
        ResponseKind::Data => decode_data(line),
    }
}

/// Decode an `OK[ <message>]` line
///
/// A bare `OK` carries no message; otherwise the message is everything
/// after the third byte.
fn decode_ok(line: &[u8]) -> Result<Response> {
    let message = if line.len() > 2 {
        Some(lossy_text(&line[3..]))
    } else {
        None
    };

    Ok(Response::Ok { message })
}

/// Decode an `ERR <code>[ <description>]` line
///
/// The numeric code is required; the description, if present, is kept
/// verbatim.
fn decode_error(line: &[u8]) -> Result<Response> {
    let rest = if line.len() > 4 { &line[4..] } else { &[][..] };

    let (code_bytes, description) = match rest.iter().position(|&b| b == b' ') {
        Some(pos) => (&rest[..pos], Some(lossy_text(&rest[pos + 1..]))),
        None => (rest, None),
    };

    let code = std::str::from_utf8(code_bytes)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            AssuanError::ResponseParse(format!(
                "ERR line has missing or malformed numeric code: {}",
                line_preview(line)
            ))
        })?;

    Ok(Response::Error { code, description })
}

/// Decode an `S <keyword> <text>` line
///
/// The keyword is required; the trailing text may be empty. Whether the
/// line is status information or an inquiry is a protocol-state question
/// the caller answers, not something the wire encodes.
fn decode_status(line: &[u8]) -> Result<Response> {
    let rest = if line.len() > 2 { &line[2..] } else { &[][..] };

    let (keyword, text) = match rest.iter().position(|&b| b == b' ') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, &[][..]),
    };

    if keyword.is_empty() {
        return Err(AssuanError::ResponseParse(format!(
            "S line is missing its keyword: {}",
            line_preview(line)
        )));
    }

    Ok(Response::Status {
        keyword: lossy_text(keyword),
        text: lossy_text(text),
    })
}

/// Decode a `# <comment>` line
fn decode_comment(line: &[u8]) -> Result<Response> {
    // Strip '#' and the conventional single space after it.
    let rest = &line[1..];
    let rest = match rest.first() {
        Some(&b' ') => &rest[1..],
        _ => rest,
    };

    Ok(Response::Comment {
        text: lossy_text(rest),
    })
}

/// Decode a `D <percent-encoded-bytes>` line back to the raw payload
fn decode_data(line: &[u8]) -> Result<Response> {
    let encoded = if line.len() > 2 { &line[2..] } else { &[][..] };
    let payload = percent_decode(encoded)?;

    Ok(Response::Data { payload })
}

// =============================================================================
// Helpers
// =============================================================================

/// Exact-prefix match at position 0, bounded by space or end-of-line
fn starts_with_token(line: &[u8], token: &[u8]) -> bool {
    line.starts_with(token) && (line.len() == token.len() || line[token.len()] == b' ')
}

/// Lossy text view of a line fragment
///
/// Meta lines are ASCII in practice; stray high bytes are replaced
/// rather than treated as a parse failure. Binary payloads never go
/// through here.
fn lossy_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Short printable preview of a line for error messages
fn line_preview(line: &[u8]) -> String {
    const MAX_PREVIEW: usize = 40;

    let end = line.len().min(MAX_PREVIEW);
    let mut preview = String::from_utf8_lossy(&line[..end]).into_owned();
    if line.len() > MAX_PREVIEW {
        preview.push_str("...");
    }
    preview
}
