//! `scanf`-style token and integer reading over any buffered reader.
//!
//! Mirrors the boundaries of C's `%s` and `%ld` conversions: leading
//! whitespace is skipped, and the byte that ends a token or number is left in
//! the reader for the next call.

use std::io::{self, BufRead};

use crate::RtError;

/// Whitespace as classified by C `isspace` in the "C" locale.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Reads tokens and integers from `R`.
pub struct Scanner<R> {
    reader: R,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Scanner { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one whitespace-delimited token into `staging`.
    ///
    /// `staging` is cleared first. Fails with [`RtError::TokenTooLong`] once
    /// the token would exceed `limit` bytes, and with
    /// [`RtError::UnexpectedEof`] if input ends before the token starts.
    pub fn read_token(&mut self, limit: usize, staging: &mut Vec<u8>) -> Result<(), RtError> {
        staging.clear();
        if !self.skip_space()? {
            return Err(RtError::UnexpectedEof);
        }

        loop {
            let (taken, done) = match self.reader.fill_buf() {
                Ok([]) => return Ok(()),
                Ok(buf) => {
                    let end = buf.iter().position(|&b| is_space(b)).unwrap_or(buf.len());
                    if staging.len() + end > limit {
                        return Err(RtError::TokenTooLong { limit });
                    }
                    staging.extend_from_slice(&buf[..end]);
                    (end, end < buf.len())
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.reader.consume(taken);
            if done {
                return Ok(());
            }
        }
    }

    /// Read one signed decimal integer.
    ///
    /// Accepts an optional `+` or `-` followed by at least one digit and
    /// saturates at the `i64` bounds, as `strtol` does.
    pub fn read_integer(&mut self) -> Result<i64, RtError> {
        if !self.skip_space()? {
            return Err(RtError::UnexpectedEof);
        }

        let negative = match self.peek()? {
            Some(sign @ (b'-' | b'+')) => {
                self.reader.consume(1);
                sign == b'-'
            }
            _ => false,
        };

        let mut value: i64 = 0;
        let mut digits = 0usize;
        while let Some(byte @ b'0'..=b'9') = self.peek()? {
            self.reader.consume(1);
            digits += 1;
            let digit = i64::from(byte - b'0');
            // Accumulate toward the sign so i64::MIN is reachable.
            value = if negative {
                value.saturating_mul(10).saturating_sub(digit)
            } else {
                value.saturating_mul(10).saturating_add(digit)
            };
        }

        if digits == 0 {
            return Err(RtError::ExpectedInteger);
        }
        Ok(value)
    }

    /// Consume leading whitespace. Returns `false` at end of input.
    ///
    /// Each iteration fills the reader once, so a single end-of-input report
    /// is final even if the source would yield more data afterwards.
    fn skip_space(&mut self) -> Result<bool, RtError> {
        loop {
            let (skipped, found) = match self.reader.fill_buf() {
                Ok([]) => return Ok(false),
                Ok(buf) => match buf.iter().position(|&b| !is_space(b)) {
                    Some(at) => (at, true),
                    None => (buf.len(), false),
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.reader.consume(skipped);
            if found {
                return Ok(true);
            }
        }
    }

    fn peek(&mut self) -> Result<Option<u8>, RtError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}
