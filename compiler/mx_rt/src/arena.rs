//! Process-lifetime string allocator.
//!
//! Heap layout of every runtime string:
//!
//! ```text
//!   +────────────+──────────────────────+─────+
//!   | len: i64   | content bytes ...    | NUL |
//!   +────────────+──────────────────────+─────+
//!   ^            ^
//!   base         base + 8
//! ```
//!
//! Generated code reads `len` at offset 0 and content at offset 8 directly,
//! so this layout is an ABI contract. Allocations are never freed: there is no
//! ownership protocol to release them against, and program lifetimes are short.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

/// Size of the length header preceding the content.
pub const HEADER_SIZE: usize = 8;

/// Trailing NUL kept for C-string interop; not counted in `len`.
pub const TERMINATOR_SIZE: usize = 1;

const ALIGN: usize = 8;

static STRINGS: AtomicU64 = AtomicU64::new(0);
static BYTES: AtomicU64 = AtomicU64::new(0);

/// Totals handed out by the arena since process start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    pub strings: u64,
    pub bytes: u64,
}

/// Snapshot of the allocation counters.
pub fn stats() -> ArenaStats {
    ArenaStats {
        strings: STRINGS.load(Ordering::Relaxed),
        bytes: BYTES.load(Ordering::Relaxed),
    }
}

/// Allocate a string block with room for `len` content bytes.
///
/// The header is written and the terminator is zeroed; the content region is
/// left uninitialized for the caller to fill. Allocation failure aborts the
/// process through `handle_alloc_error`.
pub(crate) fn alloc_str(len: usize) -> NonNull<u8> {
    let layout = layout_for(len);

    // SAFETY: layout has non-zero size (at least header + terminator)
    let base = unsafe { alloc::alloc(layout) };
    let Some(base) = NonNull::new(base) else {
        tracing::error!(len, "string allocation failed");
        alloc::handle_alloc_error(layout);
    };

    // SAFETY: base is 8-byte aligned and valid for HEADER_SIZE + len + 1 bytes
    unsafe {
        base.as_ptr().cast::<i64>().write(len as i64);
        base.as_ptr().add(HEADER_SIZE + len).write(0);
    }

    STRINGS.fetch_add(1, Ordering::Relaxed);
    BYTES.fetch_add(layout.size() as u64, Ordering::Relaxed);
    tracing::trace!(len, size = layout.size(), "allocated runtime string");

    base
}

fn layout_for(len: usize) -> Layout {
    let size = len
        .checked_add(HEADER_SIZE + TERMINATOR_SIZE)
        .unwrap_or(usize::MAX);
    match Layout::from_size_align(size, ALIGN) {
        Ok(layout) => layout,
        // Only reachable for sizes beyond isize::MAX, which no allocator serves.
        Err(_) => alloc::handle_alloc_error(Layout::new::<[u8; HEADER_SIZE]>()),
    }
}
