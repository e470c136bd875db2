// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for unixffi-libc.
use thiserror::Error;

/// Errors returned by every operation that crosses into the C library.
///
/// Expected environmental failures (unsupported host, missing library or
/// symbol, native error codes) are always returned as values.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LibcError {
    /// The host has no native-call capability or no supported C library.
    #[error("native library access is not supported: {reason}")]
    UnsupportedRuntime {
        /// Why the host was rejected.
        reason: String,
    },

    /// The shared library could not be opened.
    #[error("failed to load `{library}`: {reason}")]
    LibraryLoad {
        /// Library name or path passed to the loader.
        library: String,
        /// Loader diagnostic.
        reason: String,
    },

    /// A required symbol is absent from the loaded library.
    #[error("symbol `{symbol}` not found in `{library}`")]
    MissingSymbol {
        /// Symbol name.
        symbol: &'static str,
        /// Library the symbol was looked up in.
        library: String,
    },

    /// The native call reported a failure code.
    ///
    /// Exhausting the buffer growth policy is reported with `ERANGE`.
    #[error("`{symbol}` failed with code {code}")]
    NativeCall {
        /// Symbol that failed.
        symbol: &'static str,
        /// errno-style code reported by the call.
        code: i32,
    },

    /// An argument cannot be represented in the native call.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// The handle was closed before the call.
    #[error("library handle is closed")]
    HandleClosed,
}

impl LibcError {
    /// Returns true if a database lookup found no matching entry.
    pub fn is_not_found(&self) -> bool {
        #[cfg(unix)]
        {
            matches!(
                self,
                LibcError::NativeCall { code, .. } if *code == libc::ENOENT || *code == libc::ESRCH
            )
        }

        #[cfg(not(unix))]
        {
            false
        }
    }
}
