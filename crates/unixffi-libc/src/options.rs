// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::path::{Path, PathBuf};

/// Environment variable overriding the C library path.
pub const LIBRARY_PATH_ENV: &str = "UNIXFFI_LIBC_PATH";

/// Default C library name for the compilation target.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub const DEFAULT_LIBRARY: &str = "libc.so.6";
/// Default C library name for the compilation target.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub const DEFAULT_LIBRARY: &str = "/usr/lib/libSystem.B.dylib";
/// Default C library name for the compilation target.
#[cfg(target_os = "freebsd")]
pub const DEFAULT_LIBRARY: &str = "libc.so.7";
/// Default C library name for the compilation target.
#[cfg(not(any(
    all(target_os = "linux", target_env = "gnu"),
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
pub const DEFAULT_LIBRARY: &str = "libc.so";

/// Scratch buffer growth policy for calls that report "buffer too small".
///
/// The first attempt uses `initial_size`; each range error doubles the size,
/// for at most `max_attempts` doublings and never beyond `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Size of the first scratch buffer in bytes. `getgroups` is seeded from
    /// its count query instead.
    pub initial_size: usize,
    /// Maximum number of doublings after the first attempt.
    pub max_attempts: u32,
    /// Upper bound for the scratch buffer size.
    pub max_size: usize,
}

impl GrowthPolicy {
    /// Creates a policy.
    pub const fn new(initial_size: usize, max_attempts: u32, max_size: usize) -> Self {
        Self {
            initial_size,
            max_attempts,
            max_size,
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(1024, 10, 1 << 20)
    }
}

/// Options for opening the C library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    library: Option<PathBuf>,
    growth: GrowthPolicy,
}

impl OpenOptions {
    /// Default options: target C library, default growth policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with the library path taken from [`LIBRARY_PATH_ENV`]
    /// when it is set and non-empty.
    pub fn from_env() -> Self {
        let options = Self::new();

        match std::env::var_os(LIBRARY_PATH_ENV) {
            Some(path) if !path.is_empty() => options.with_library(path),
            _ => options,
        }
    }

    /// Opens `library` instead of the target default.
    pub fn with_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Uses `growth` for scratch buffers.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Explicit library override, if any.
    pub fn library(&self) -> Option<&Path> {
        self.library.as_deref()
    }

    /// Scratch buffer growth policy.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Library name or path the loader will be given.
    pub fn library_target(&self) -> PathBuf {
        self.library
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY))
    }
}
