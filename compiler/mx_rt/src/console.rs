//! Process standard input and output for generated programs.
//!
//! Reads lock `std::io::stdin()` per call; the standard library keeps one
//! shared input buffer, so bytes read ahead by a token read stay available to
//! the next integer read. Token reads stage through a thread-local buffer
//! that is reused across calls.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use crate::scan::Scanner;
use crate::{config, RtError, RtStr};

thread_local! {
    static STAGING: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

/// Token read with the runtime's fallbacks applied.
///
/// End of input yields the empty string. The token may be at most
/// `config::get().max_token_len` bytes. Returned errors are fatal for
/// generated code.
pub fn read_token_from<R: BufRead>(reader: R) -> Result<RtStr, RtError> {
    let limit = config::get().max_token_len;
    let mut scanner = Scanner::new(reader);
    let staged = STAGING.with(|staging| {
        let mut staging = staging.borrow_mut();
        let capacity = staging.capacity();
        scanner.read_token(limit, &mut staging)?;
        if staging.capacity() != capacity {
            tracing::debug!(capacity = staging.capacity(), "token staging buffer grew");
        }
        Ok(RtStr::from_bytes(&staging))
    });
    match staged {
        Err(RtError::UnexpectedEof) => {
            tracing::debug!("token read hit end of input");
            Ok(RtStr::from_bytes(b""))
        }
        other => other,
    }
}

/// Integer read with the runtime's fallbacks applied.
///
/// End of input or non-numeric input yields 0. Returned errors are fatal for
/// generated code.
pub fn read_integer_from<R: BufRead>(reader: R) -> Result<i64, RtError> {
    match Scanner::new(reader).read_integer() {
        Err(err @ (RtError::UnexpectedEof | RtError::ExpectedInteger)) => {
            tracing::debug!(%err, "integer read fell back to 0");
            Ok(0)
        }
        other => other,
    }
}

/// Token read from stdin for generated code.
pub fn read_token() -> RtStr {
    read_token_from(io::stdin().lock()).unwrap_or_else(|err| fatal(&err))
}

/// Integer read from stdin for generated code.
pub fn read_integer() -> i64 {
    read_integer_from(io::stdin().lock()).unwrap_or_else(|err| fatal(&err))
}

/// Write `s`'s content up to its first NUL, plus a newline when `newline`
/// is set. This is what `printf("%s")` and `puts` emit for the same block.
pub fn write_str<W: Write>(out: &mut W, s: RtStr, newline: bool) -> io::Result<()> {
    let content = s.as_bytes();
    let end = content.iter().position(|&b| b == 0).unwrap_or(content.len());
    out.write_all(&content[..end])?;
    if newline {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write to stdout. Errors are logged and dropped, as C stdio drops them.
pub fn print(s: RtStr, newline: bool) {
    if let Err(err) = write_str(&mut io::stdout().lock(), s, newline) {
        tracing::warn!(%err, "write to stdout failed");
    }
}

/// Flush stdout; the C `main` that hosts generated code never runs Rust's
/// exit-time flush.
pub fn flush_stdout() {
    if let Err(err) = io::stdout().flush() {
        tracing::warn!(%err, "flush of stdout failed");
    }
}

/// Report an unrecoverable runtime error and exit with status 1.
pub fn fatal(err: &RtError) -> ! {
    tracing::error!(%err, "fatal runtime error");
    flush_stdout();
    eprintln!("mx runtime error: {err}");
    std::process::exit(1)
}

#[cfg(test)]
mod tests;
