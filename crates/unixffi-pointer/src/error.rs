// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for unixffi-pointer.
use thiserror::Error;

/// Errors returned when a [`Pointer`](crate::Pointer) cannot produce a buffer view.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum PointerError {
    /// The pointer is null.
    #[error("cannot read through a null pointer")]
    NullPointer,

    /// The pointer has no known length and none was supplied.
    #[error("buffer length is unknown and was not supplied")]
    UnknownLength,

    /// The requested range exceeds the known length of the pointer.
    #[error("range {offset}..{offset}+{length} exceeds {available} available bytes")]
    OutOfBounds {
        /// Requested start offset.
        offset: usize,
        /// Requested length.
        length: usize,
        /// Bytes available behind the pointer.
        available: usize,
    },
}
