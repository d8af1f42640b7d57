//! Mx Runtime Library (`libmx_rt`)
//!
//! Runtime support linked into the x86-64 assembly emitted by the Mx
//! compiler. It supplies the primitives generated code cannot inline because
//! they allocate or talk to the C library: string construction, inspection,
//! integer conversion, and console I/O.
//!
//! # Build Modes
//!
//! - **rlib**: For Rust consumers and tests
//! - **staticlib**: For linking with the assembled program (`libmx_rt.a`)
//!
//! With the `entry` feature the staticlib also provides the C `main`, which
//! calls the compiler-generated `_global_init` once and returns its status.
//!
//! # String Layout
//!
//! `[len: i64][len content bytes][NUL]`, addressed by a pointer to `len`.
//! Generated code reads the header and content at fixed offsets, so the
//! layout is part of the ABI. See [`arena`] and [`string`].
//!
//! # Function Categories
//!
//! - **I/O**: `__print`, `__println`, `__getString`, `__getInt`
//! - **Conversion**: `__toString`, `__string_parseInt`
//! - **Strings**: `__string_length`, `__string_substring`, `__string_ord`,
//!   `__string_concat`, `__string_compare`
//! - **Arrays**: `__array_size`
//!
//! # Safety
//!
//! Exported functions are called from generated code, which guarantees valid
//! string handles and in-range indices. They're not marked `unsafe` because
//! they're `extern "C"` FFI entry points, not Rust API functions. Rust callers
//! get checked variants on [`RtStr`].
//!
//! # Debugging
//!
//! Set `RUST_LOG=mx_rt=debug` (or `trace`) before running a linked program.

#![warn(clippy::allow_attributes_without_reason)]
#![allow(
    unsafe_code,
    reason = "C-ABI runtime functions require unsafe for raw pointer operations"
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from generated code which guarantees validity"
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_ptr_alignment,
    reason = "string headers are i64 for ABI compatibility; casts are intentional"
)]

pub mod abi;
pub mod arena;
pub mod config;
pub mod console;
mod error;
pub mod scan;
pub mod string;

use std::sync::Once;

pub use abi::run_main;
pub use config::RuntimeConfig;
pub use error::RtError;
pub use string::RtStr;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, so normal runs keep stderr clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
