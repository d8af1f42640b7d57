//! Tests for console fallbacks and output.

use std::io::{self, Cursor, Read};

use pretty_assertions::assert_eq;

use super::*;

fn input(text: &str) -> Cursor<Vec<u8>> {
    Cursor::new(text.as_bytes().to_vec())
}

/// Reader whose every fill fails with a non-retryable error.
struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

impl BufRead for Broken {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn consume(&mut self, _: usize) {}
}

// ── Token fallbacks ─────────────────────────────────────────────────────

#[test]
fn token_is_read() {
    let token = read_token_from(input("  42 rest")).ok();
    assert_eq!(token.map(RtStr::as_bytes), Some(&b"42"[..]));
}

#[test]
fn token_at_end_of_input_is_empty() {
    let token = read_token_from(input(" \n\t")).ok();
    assert_eq!(token.map(RtStr::len), Some(0));
}

#[test]
fn token_over_configured_limit_is_fatal() {
    // Tests never install a configuration, so the default limit applies.
    let limit = config::get().max_token_len;
    let long = "a".repeat(limit + 1);
    assert!(matches!(
        read_token_from(input(&long)),
        Err(RtError::TokenTooLong { limit: l }) if l == limit
    ));
}

#[test]
fn token_at_configured_limit_is_accepted() {
    let limit = config::get().max_token_len;
    let exact = "b".repeat(limit);
    let token = read_token_from(input(&exact)).ok();
    assert_eq!(token.map(RtStr::len), Some(limit as i64));
}

#[test]
fn token_io_error_is_fatal() {
    assert!(matches!(read_token_from(Broken), Err(RtError::Io(_))));
}

#[test]
fn staging_buffer_is_reused_across_reads() {
    read_token_from(input(&"c".repeat(4096))).ok();
    let grown = STAGING.with(|staging| staging.borrow().capacity());
    assert!(grown >= 4096);

    let short = read_token_from(input("dd")).ok();
    assert_eq!(short.map(RtStr::as_bytes), Some(&b"dd"[..]));
    let after = STAGING.with(|staging| staging.borrow().capacity());
    assert_eq!(after, grown);
}

#[test]
fn returned_token_does_not_alias_staging() {
    let first = read_token_from(input("first")).ok();
    let second = read_token_from(input("xx")).ok();
    assert_eq!(first.map(RtStr::as_bytes), Some(&b"first"[..]));
    assert_eq!(second.map(RtStr::as_bytes), Some(&b"xx"[..]));
}

// ── Integer fallbacks ───────────────────────────────────────────────────

#[test]
fn integer_is_read() {
    assert_eq!(read_integer_from(input(" -12 ")).ok(), Some(-12));
}

#[test]
fn integer_at_end_of_input_is_zero() {
    assert_eq!(read_integer_from(input("")).ok(), Some(0));
    assert_eq!(read_integer_from(input("  \n")).ok(), Some(0));
}

#[test]
fn malformed_integer_is_zero() {
    assert_eq!(read_integer_from(input("x")).ok(), Some(0));
}

#[test]
fn integer_io_error_is_fatal() {
    assert!(matches!(read_integer_from(Broken), Err(RtError::Io(_))));
}

// ── Output ──────────────────────────────────────────────────────────────

#[test]
fn write_str_without_newline() {
    let mut out = Vec::new();
    write_str(&mut out, RtStr::from_bytes(b"abc"), false).ok();
    assert_eq!(out, b"abc");
}

#[test]
fn write_str_with_newline() {
    let mut out = Vec::new();
    write_str(&mut out, RtStr::from_bytes(b"abc"), true).ok();
    write_str(&mut out, RtStr::from_bytes(b""), true).ok();
    assert_eq!(out, b"abc\n\n");
}

#[test]
fn write_str_stops_at_embedded_nul() {
    let mut out = Vec::new();
    write_str(&mut out, RtStr::from_bytes(b"ab\0cd"), false).ok();
    write_str(&mut out, RtStr::from_bytes(b"x\0y"), true).ok();
    assert_eq!(out, b"abx\n");
}
