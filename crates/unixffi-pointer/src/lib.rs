// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Views over foreign memory returned by native calls.
//!
//! A [`Pointer`] wraps an address handed across the FFI boundary together with
//! an optional known length. Bounded pointers (built from a slice) never read
//! past their end; unbounded pointers (built from a raw address) trust the
//! caller's promise that the target is readable.
//!
//! # Null handling
//!
//! A null pointer short-circuits every dereference:
//!
//! - [`Pointer::to_c_string`] and [`Pointer::to_wide_string`] return `""`
//! - [`Pointer::slice`] returns another null pointer
//! - [`Pointer::to_buffer`] fails with [`PointerError::NullPointer`]
//!
//! # Example
//!
//! ```rust
//! use unixffi_pointer::Pointer;
//!
//! let scratch = b"root\0x\0/root\0";
//! let ptr = Pointer::from_slice(scratch);
//!
//! assert_eq!(ptr.to_c_string(0), "root");
//! assert_eq!(ptr.slice(7).to_c_string(0), "/root");
//! assert_eq!(Pointer::null().to_c_string(0), "");
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod pointer;

pub use error::PointerError;
pub use pointer::Pointer;
