//! Line Reassembler Tests
//!
//! Tests for chunk-to-line reassembly across arbitrary chunk boundaries.

use assuan_client::protocol::LineReassembler;
use assuan_client::AssuanError;

// =============================================================================
// Basic Framing Tests
// =============================================================================

#[test]
fn test_single_complete_line() {
    let mut reassembler = LineReassembler::new();
    let lines = reassembler.feed(b"OK\n").unwrap();

    assert_eq!(lines, vec![b"OK".to_vec()]);
    assert_eq!(reassembler.pending(), 0);
}

#[test]
fn test_multiple_lines_in_one_chunk() {
    let mut reassembler = LineReassembler::new();
    let lines = reassembler.feed(b"S PROGRESS 1\n# note\nOK\n").unwrap();

    assert_eq!(
        lines,
        vec![b"S PROGRESS 1".to_vec(), b"# note".to_vec(), b"OK".to_vec()]
    );
}

#[test]
fn test_empty_line_is_emitted() {
    let mut reassembler = LineReassembler::new();
    let lines = reassembler.feed(b"\n").unwrap();

    assert_eq!(lines, vec![Vec::<u8>::new()]);
}

#[test]
fn test_terminator_is_stripped() {
    let mut reassembler = LineReassembler::new();
    let lines = reassembler.feed(b"D foo%0Abar\n").unwrap();

    assert_eq!(lines, vec![b"D foo%0Abar".to_vec()]);
}

// =============================================================================
// Chunk Boundary Tests
// =============================================================================

#[test]
fn test_line_split_across_two_chunks() {
    let mut reassembler = LineReassembler::new();

    // First chunk ends mid-line: nothing may be emitted yet.
    let lines = reassembler.feed(b"OK Plea").unwrap();
    assert!(lines.is_empty());
    assert_eq!(reassembler.pending(), 7);

    // Second chunk completes the line.
    let lines = reassembler.feed(b"sed\n").unwrap();
    assert_eq!(lines, vec![b"OK Pleased".to_vec()]);
    assert_eq!(reassembler.pending(), 0);
}

#[test]
fn test_line_delivered_byte_by_byte() {
    let mut reassembler = LineReassembler::new();
    let mut collected = Vec::new();

    for &byte in b"ERR 1 oops\n" {
        collected.extend(reassembler.feed(&[byte]).unwrap());
    }

    assert_eq!(collected, vec![b"ERR 1 oops".to_vec()]);
}

#[test]
fn test_chunk_with_complete_line_and_partial_tail() {
    let mut reassembler = LineReassembler::new();

    let lines = reassembler.feed(b"# first\n# sec").unwrap();
    assert_eq!(lines, vec![b"# first".to_vec()]);
    assert_eq!(reassembler.pending(), 5);

    let lines = reassembler.feed(b"ond\n").unwrap();
    assert_eq!(lines, vec![b"# second".to_vec()]);
}

#[test]
fn test_terminator_arriving_alone() {
    let mut reassembler = LineReassembler::new();

    assert!(reassembler.feed(b"OK").unwrap().is_empty());
    let lines = reassembler.feed(b"\n").unwrap();
    assert_eq!(lines, vec![b"OK".to_vec()]);
}

#[test]
fn test_partial_line_is_never_force_emitted() {
    let mut reassembler = LineReassembler::new();

    assert!(reassembler.feed(b"S KEY without end").unwrap().is_empty());
    assert!(reassembler.feed(b" more").unwrap().is_empty());
    assert_eq!(reassembler.pending(), 22);
}

#[test]
fn test_empty_chunk_is_harmless() {
    let mut reassembler = LineReassembler::new();

    assert!(reassembler.feed(b"").unwrap().is_empty());
    assert!(reassembler.feed(b"OK").unwrap().is_empty());
    assert!(reassembler.feed(b"").unwrap().is_empty());
    let lines = reassembler.feed(b"\n").unwrap();
    assert_eq!(lines, vec![b"OK".to_vec()]);
}

// =============================================================================
// Limit Tests
// =============================================================================

#[test]
fn test_unterminated_line_over_limit_fails() {
    let mut reassembler = LineReassembler::with_limit(16);

    let result = reassembler.feed(&[b'x'; 17]);
    assert!(matches!(result, Err(AssuanError::Framing(_))));
}

#[test]
fn test_limit_applies_to_accumulated_bytes() {
    let mut reassembler = LineReassembler::with_limit(16);

    assert!(reassembler.feed(&[b'x'; 10]).unwrap().is_empty());
    let result = reassembler.feed(&[b'x'; 10]);
    assert!(matches!(result, Err(AssuanError::Framing(_))));
}

#[test]
fn test_long_terminated_line_within_limit_passes() {
    let mut reassembler = LineReassembler::with_limit(16);

    let mut chunk = vec![b'y'; 16];
    chunk.push(b'\n');
    let lines = reassembler.feed(&chunk).unwrap();

    assert_eq!(lines, vec![vec![b'y'; 16]]);
}
