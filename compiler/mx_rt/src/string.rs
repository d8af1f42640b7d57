//! Runtime strings as seen by generated code.
//!
//! An [`RtStr`] is a pointer to the length header of an arena block (see
//! [`crate::arena`]). It is `#[repr(transparent)]` over a non-null pointer, so
//! it has the exact ABI of the `char*` the compiler passes around, and C-ABI
//! exports take and return it directly.
//!
//! Strings are immutable once returned: every transforming operation
//! (`concat`, `substring`, `from_int`) allocates a fresh block.
//!
//! # Checked and unchecked access
//!
//! Generated code has already proven its indices, so the exports call the
//! `*_unchecked` variants, which only verify bounds under `debug_assert!`.
//! Rust callers use [`RtStr::substring`] and [`RtStr::char_at`], which report
//! violations as [`RtError`].

use std::fmt;
use std::ptr::{self, NonNull};

use crate::arena::{self, HEADER_SIZE};
use crate::RtError;

/// Offset of the first content byte from the string's base pointer.
pub const CONTENT_OFFSET: usize = HEADER_SIZE;

/// Handle to an immutable, length-prefixed, NUL-terminated byte string.
///
/// Handles are `Copy`: blocks are never freed, so every handle stays valid
/// for the rest of the process.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct RtStr(NonNull<u8>);

// SAFETY: the pointee is immutable and never freed.
unsafe impl Send for RtStr {}
// SAFETY: the pointee is immutable and never freed.
unsafe impl Sync for RtStr {}

impl RtStr {
    /// Copy `bytes` into a fresh runtime string.
    pub fn from_bytes(bytes: &[u8]) -> RtStr {
        let s = Self::alloc_with(bytes.len(), |content| {
            content.copy_from_slice(bytes);
        });
        tracing::trace!(len = bytes.len(), "string from bytes");
        s
    }

    /// Canonical decimal rendering of `n`.
    pub fn from_int(n: i64) -> RtStr {
        let mut buf = itoa::Buffer::new();
        Self::from_bytes(buf.format(n).as_bytes())
    }

    /// Wrap a pointer produced by generated code or by [`RtStr::as_ptr`].
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must point to an 8-byte aligned block laid out as
    /// `[len: i64][len bytes][NUL]` that is never freed or mutated.
    pub unsafe fn from_raw(ptr: *const u8) -> Option<RtStr> {
        NonNull::new(ptr.cast_mut()).map(RtStr)
    }

    /// Base pointer (the length header), as handed to generated code.
    pub fn as_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Stored header value.
    pub fn len(self) -> i64 {
        // SAFETY: every RtStr points at a valid header
        unsafe { self.0.as_ptr().cast::<i64>().read() }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Content bytes, excluding the terminator.
    pub fn as_bytes(self) -> &'static [u8] {
        // SAFETY: content spans `len` bytes after the header and is never freed
        unsafe { std::slice::from_raw_parts(self.content_ptr(), self.len() as usize) }
    }

    /// Content bytes followed by the NUL terminator.
    pub fn as_bytes_with_nul(self) -> &'static [u8] {
        // SAFETY: the terminator is part of the block
        unsafe { std::slice::from_raw_parts(self.content_ptr(), self.len() as usize + 1) }
    }

    /// Byte at `index`, sign-extended to `i64` as a C `char` is on x86-64.
    pub fn char_at(self, index: i64) -> Result<i64, RtError> {
        let len = self.len();
        if !(0..len).contains(&index) {
            return Err(RtError::IndexOutOfRange { index, len });
        }
        Ok(self.char_at_unchecked(index))
    }

    /// Byte at `index` without a release-mode bounds check.
    ///
    /// Callers guarantee `0 <= index < len`. Bytes `0x80..=0xff` come back
    /// negative, matching generated code that reads the byte as a signed char.
    pub fn char_at_unchecked(self, index: i64) -> i64 {
        debug_assert!((0..self.len()).contains(&index), "char_at index {index}");
        // SAFETY: caller guarantees index is inside the content region
        let byte = unsafe { self.content_ptr().add(index as usize).read() };
        i64::from(byte as i8)
    }

    /// Inclusive range `[left, right]` as a new string.
    pub fn substring(self, left: i64, right: i64) -> Result<RtStr, RtError> {
        let len = self.len();
        if left < 0 || left > right || right >= len {
            return Err(RtError::InvalidRange { left, right, len });
        }
        Ok(self.substring_unchecked(left, right))
    }

    /// Inclusive range `[left, right]` without a release-mode bounds check.
    ///
    /// Callers guarantee `0 <= left <= right < len`.
    pub fn substring_unchecked(self, left: i64, right: i64) -> RtStr {
        debug_assert!(
            0 <= left && left <= right && right < self.len(),
            "substring range [{left}, {right}]"
        );
        let count = (right - left + 1) as usize;
        // SAFETY: caller guarantees the range lies inside the content region
        let src = unsafe { self.content_ptr().add(left as usize) };
        Self::alloc_with(count, |content| {
            // SAFETY: src is valid for `count` bytes and cannot overlap a fresh block
            unsafe { ptr::copy_nonoverlapping(src, content.as_mut_ptr(), count) };
        })
    }

    /// `self` followed by `other`, as a new string.
    pub fn concat(self, other: RtStr) -> RtStr {
        let (a, b) = (self.as_bytes(), other.as_bytes());
        Self::alloc_with(a.len() + b.len(), |content| {
            let (head, tail) = content.split_at_mut(a.len());
            head.copy_from_slice(a);
            tail.copy_from_slice(b);
        })
    }

    /// `strcmp` over the NUL-terminated content regions.
    ///
    /// Returns the difference of the first differing bytes (as unsigned
    /// chars), or 0 when both regions match up to a terminator.
    pub fn compare(self, other: RtStr) -> i64 {
        let pairs = self.as_bytes_with_nul().iter().zip(other.as_bytes_with_nul());
        for (&a, &b) in pairs {
            if a != b {
                return i64::from(a) - i64::from(b);
            }
            if a == 0 {
                break;
            }
        }
        0
    }

    /// Leading optional `-` and decimal digits, as an integer.
    ///
    /// Stops at the first non-digit, yields 0 when no digits follow, and wraps
    /// on overflow so that `parse_int(from_int(n)) == n` for every `i64`.
    pub fn parse_int(self) -> i64 {
        let bytes = self.as_bytes();
        let (negative, digits) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };
        let magnitude = digits
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .fold(0i64, |acc, &d| {
                acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0'))
            });
        if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        }
    }

    fn content_ptr(self) -> *const u8 {
        // SAFETY: the content region starts right after the header
        unsafe { self.0.as_ptr().add(CONTENT_OFFSET) }
    }

    /// Allocate a block of `len` content bytes and let `fill` write them.
    fn alloc_with(len: usize, fill: impl FnOnce(&mut [u8])) -> RtStr {
        let base = arena::alloc_str(len);
        // SAFETY: the block has `len` writable content bytes after the header.
        // Uninitialized u8 is zeroed first so the slice is fully initialized.
        let content = unsafe {
            let start = base.as_ptr().add(CONTENT_OFFSET);
            ptr::write_bytes(start, 0, len);
            std::slice::from_raw_parts_mut(start, len)
        };
        fill(content);
        RtStr(base)
    }
}

impl fmt::Debug for RtStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RtStr({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Display for RtStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
