//! C-ABI symbols called by compiler-generated assembly.
//!
//! Symbol names are fixed by the code generator. Every string argument and
//! result is an [`RtStr`], which has the ABI of the `char*` pointing at the
//! length header. Indices come from generated code that has already checked
//! them, so these entry points use the unchecked string operations.

use crate::console;
use crate::RtStr;

/// `print(s)`: content without a trailing newline.
#[export_name = "__print"]
pub extern "C" fn mx_print(s: RtStr) {
    console::print(s, false);
}

/// `println(s)`: content followed by `\n`.
#[export_name = "__println"]
pub extern "C" fn mx_println(s: RtStr) {
    console::print(s, true);
}

/// `getString()`: next whitespace-delimited token from stdin.
#[export_name = "__getString"]
pub extern "C" fn mx_get_string() -> RtStr {
    console::read_token()
}

/// `getInt()`: next signed decimal integer from stdin.
#[export_name = "__getInt"]
pub extern "C" fn mx_get_int() -> i64 {
    console::read_integer()
}

/// `toString(n)`: decimal rendering of `n`.
#[export_name = "__toString"]
pub extern "C" fn mx_to_string(n: i64) -> RtStr {
    RtStr::from_int(n)
}

/// `s.length()`
#[export_name = "__string_length"]
pub extern "C" fn mx_string_length(s: RtStr) -> i64 {
    s.len()
}

/// `s.substring(left, right)`: inclusive range, requires `0 <= left <= right < len`.
#[export_name = "__string_substring"]
pub extern "C" fn mx_string_substring(s: RtStr, left: i64, right: i64) -> RtStr {
    s.substring_unchecked(left, right)
}

/// `s.parseInt()`
#[export_name = "__string_parseInt"]
pub extern "C" fn mx_string_parse_int(s: RtStr) -> i64 {
    s.parse_int()
}

/// `s.ord(index)`: byte value at `index`, requires `0 <= index < len`.
#[export_name = "__string_ord"]
pub extern "C" fn mx_string_ord(s: RtStr, index: i64) -> i64 {
    s.char_at_unchecked(index)
}

/// `a + b` on strings.
#[export_name = "__string_concat"]
pub extern "C" fn mx_string_concat(a: RtStr, b: RtStr) -> RtStr {
    a.concat(b)
}

/// `strcmp`-style comparison backing `<`, `==`, and the other relational operators.
#[export_name = "__string_compare"]
pub extern "C" fn mx_string_compare(a: RtStr, b: RtStr) -> i64 {
    a.compare(b)
}

/// `arr.size()`: arrays carry the same 8-byte length header as strings.
#[export_name = "__array_size"]
pub extern "C" fn mx_array_size(array: *const i64) -> i64 {
    // SAFETY: generated code passes the base of an array block
    unsafe { array.read() }
}

// ── Entry point ─────────────────────────────────────────────────────────

/// Run the program's initializer exactly once and return its exit status.
///
/// stdout is flushed afterwards: a C `main` never reaches the standard
/// library's exit-time flush, so buffered output would otherwise be lost.
pub fn run_main(init: extern "C" fn() -> i32) -> i32 {
    tracing::debug!("entering generated program");
    let status = init();
    console::flush_stdout();
    tracing::debug!(status, "generated program returned");
    status
}

#[cfg(feature = "entry")]
extern "C" {
    /// Emitted by the compiler: global initialization followed by `main`.
    fn _global_init() -> i32;
}

#[cfg(feature = "entry")]
extern "C" fn global_init_trampoline() -> i32 {
    // SAFETY: the linked program defines `_global_init` with this signature
    unsafe { _global_init() }
}

/// Process entry point for linked programs.
#[cfg(feature = "entry")]
#[no_mangle]
pub extern "C" fn main() -> i32 {
    crate::init_tracing();
    run_main(global_init_trampoline)
}

#[cfg(test)]
mod tests;
