//! Tests for the exported C symbols, called the way generated code calls them.

use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

fn s(text: &str) -> RtStr {
    RtStr::from_bytes(text.as_bytes())
}

#[test]
fn rt_str_has_pointer_abi() {
    assert_eq!(std::mem::size_of::<RtStr>(), std::mem::size_of::<*const u8>());
    assert_eq!(std::mem::size_of::<Option<RtStr>>(), std::mem::size_of::<*const u8>());
}

#[test]
fn to_string_then_parse_int() {
    let text = mx_to_string(-17);
    assert_eq!(mx_string_length(text), 3);
    assert_eq!(text.as_bytes(), b"-17");
    assert_eq!(mx_string_parse_int(text), -17);
}

#[test]
fn parse_int_of_token_text() {
    let token = s("42");
    assert_eq!(mx_string_length(token), 2);
    assert_eq!(mx_string_parse_int(token), 42);
}

#[test]
fn substring_export() {
    let ell = mx_string_substring(s("hello"), 1, 3);
    assert_eq!(ell.as_bytes(), b"ell");
    assert_eq!(mx_string_length(ell), 3);
}

#[test]
fn ord_export() {
    assert_eq!(mx_string_ord(s("hi"), 0), i64::from(b'h'));
}

#[test]
fn concat_export() {
    let joined = mx_string_concat(s("foo"), s("bar"));
    assert_eq!(joined.as_bytes(), b"foobar");
    assert_eq!(mx_string_length(joined), 6);
}

#[test]
fn compare_export() {
    assert!(mx_string_compare(s("abc"), s("abd")) < 0);
    assert_eq!(mx_string_compare(s("abc"), s("abc")), 0);
}

#[test]
fn exports_accept_raw_pointers_from_generated_code() {
    // Generated code hands over the header pointer; reinterpret it as a handle.
    let raw = s("raw").as_ptr();
    // SAFETY: raw points at a live string block
    let handle = unsafe { RtStr::from_raw(raw) };
    assert_eq!(handle.map(|h| mx_string_length(h)), Some(3));
}

#[test]
fn array_size_reads_length_header() {
    let array: [i64; 4] = [3, 10, 20, 30];
    assert_eq!(mx_array_size(array.as_ptr()), 3);
}

static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);

extern "C" fn fake_global_init() -> i32 {
    INIT_CALLS.fetch_add(1, Ordering::SeqCst);
    7
}

#[test]
fn run_main_calls_initializer_once() {
    INIT_CALLS.store(0, Ordering::SeqCst);
    assert_eq!(run_main(fake_global_init), 7);
    assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 1);
}
