// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Host bindings that know how to open the C library.

use crate::error::LibcError;
use crate::handle::LibcHandle;
use crate::options::OpenOptions;

/// Opens a [`LibcHandle`] for a class of host.
pub trait LibraryBinding: Send + Sync {
    /// Short binding identifier (`"posix"`, `"unsupported"`).
    fn name(&self) -> &'static str;

    /// Loads the C library and resolves every required symbol.
    ///
    /// # Errors
    ///
    /// - [`LibcError::UnsupportedRuntime`] if the host cannot load native code
    /// - [`LibcError::LibraryLoad`] if the library cannot be opened
    /// - [`LibcError::MissingSymbol`] if a required symbol is absent
    fn open(&self, options: &OpenOptions) -> Result<LibcHandle, LibcError>;
}

/// Binding for POSIX hosts: `dlopen` the C library and `dlsym` the
/// required symbols.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixBinding;

#[cfg(unix)]
impl LibraryBinding for PosixBinding {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn open(&self, options: &OpenOptions) -> Result<LibcHandle, LibcError> {
        use tracing::debug;

        use crate::handle::Loaded;
        use crate::symbols::{REQUIRED_SYMBOLS, Symbols};

        let target = options.library_target();
        let library = target.display().to_string();

        debug!(library = %library, "opening C library");

        // SAFETY: loading the platform C library runs no initialisers beyond
        // those already run for the process.
        let loaded = unsafe { libloading::Library::new(&target) }.map_err(|e| {
            LibcError::LibraryLoad {
                library: library.clone(),
                reason: e.to_string(),
            }
        })?;

        let symbols = Symbols::resolve(&loaded, &library)?;

        debug!(library = %library, symbols = REQUIRED_SYMBOLS.len(), "C library ready");

        Ok(LibcHandle::from_loaded(
            library,
            options.growth(),
            Loaded {
                library: loaded,
                symbols,
            },
        ))
    }
}

/// Binding for hosts without a supported C library. `open` always fails
/// with [`LibcError::UnsupportedRuntime`] and never attempts a load.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedBinding {
    reason: &'static str,
}

impl UnsupportedBinding {
    /// Creates a binding that rejects every open with `reason`.
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Why this host is unsupported.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl LibraryBinding for UnsupportedBinding {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn open(&self, _options: &OpenOptions) -> Result<LibcHandle, LibcError> {
        tracing::debug!(reason = self.reason, "refusing to open C library");

        Err(LibcError::UnsupportedRuntime {
            reason: self.reason.to_owned(),
        })
    }
}

/// Returns the binding for the current host, selected at compile time.
pub fn detect() -> &'static dyn LibraryBinding {
    #[cfg(unix)]
    {
        static BINDING: PosixBinding = PosixBinding;
        &BINDING
    }

    #[cfg(not(unix))]
    {
        static BINDING: UnsupportedBinding =
            UnsupportedBinding::new("no POSIX C library on this platform");
        &BINDING
    }
}

/// Opens the host C library with options from the environment.
///
/// See [`OpenOptions::from_env`].
pub fn open() -> Result<LibcHandle, LibcError> {
    open_with(&OpenOptions::from_env())
}

/// Opens the host C library with explicit `options`.
pub fn open_with(options: &OpenOptions) -> Result<LibcHandle, LibcError> {
    detect().open(options)
}

/// Opens the C library, runs `f`, and closes the library on every exit path.
///
/// Drop covers unwinding out of `f`.
pub fn with_libc<T>(f: impl FnOnce(&LibcHandle) -> Result<T, LibcError>) -> Result<T, LibcError> {
    let mut handle = open()?;
    let result = f(&handle);

    handle.close();

    result
}
