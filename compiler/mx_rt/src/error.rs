//! Errors surfaced by the checked Rust API.
//!
//! The C-ABI exports never return these: their result types cannot represent
//! a failure, so they either fall back to a neutral value or terminate the
//! process (see [`crate::console`]).

use std::io;

/// Failure of a checked runtime operation.
#[derive(Debug, thiserror::Error)]
pub enum RtError {
    /// `char_at` index outside `0..len`.
    #[error("index {index} out of range for string of length {len}")]
    IndexOutOfRange { index: i64, len: i64 },

    /// `substring` range not satisfying `0 <= left <= right < len`.
    #[error("substring range [{left}, {right}] out of bounds for string of length {len}")]
    InvalidRange { left: i64, right: i64, len: i64 },

    /// An input token did not fit in the configured staging limit.
    #[error("input token exceeds the {limit}-byte limit")]
    TokenTooLong { limit: usize },

    /// Standard input was exhausted before a token or integer started.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The next input was not a decimal integer.
    #[error("expected a decimal integer")]
    ExpectedInteger,

    /// `config::configure` called after the configuration was fixed.
    #[error("runtime configuration is already set")]
    AlreadyConfigured,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
