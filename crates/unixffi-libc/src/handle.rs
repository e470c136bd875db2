// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::Cell;
use core::marker::PhantomData;

use tracing::debug;

#[cfg(unix)]
use crate::error::LibcError;
use crate::options::GrowthPolicy;

#[cfg(unix)]
pub(crate) struct Loaded {
    pub(crate) library: libloading::Library,
    pub(crate) symbols: crate::symbols::Symbols,
}

#[cfg(not(unix))]
pub(crate) enum Loaded {}

/// An open C library session.
///
/// Bundles the loaded library with its resolved symbols. Queries are
/// available as methods (see the facade) and block the calling thread for
/// the duration of the native call; a native call cannot be cancelled, so a
/// call that hangs inside the library hangs the caller.
///
/// The handle is released by [`LibcHandle::close`] or on drop. Closing is
/// idempotent; queries on a closed handle return
/// [`LibcError::HandleClosed`].
///
/// `LibcHandle` is `Send` but not `Sync`: one handle serves one thread at a
/// time.
pub struct LibcHandle {
    library: String,
    growth: GrowthPolicy,
    loaded: Option<Loaded>,
    _not_sync: PhantomData<Cell<()>>,
}

impl LibcHandle {
    #[cfg(unix)]
    pub(crate) fn from_loaded(library: String, growth: GrowthPolicy, loaded: Loaded) -> Self {
        Self {
            library,
            growth,
            loaded: Some(loaded),
            _not_sync: PhantomData,
        }
    }

    /// Name or path the library was opened from.
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Scratch buffer growth policy used by this handle's queries.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Returns true once [`LibcHandle::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.loaded.is_none()
    }

    /// Releases the native library. Calling it again is a no-op.
    pub fn close(&mut self) {
        let Some(loaded) = self.loaded.take() else {
            return;
        };

        debug!(library = %self.library, "closing C library");
        release(loaded, &self.library);
    }

    #[cfg(unix)]
    pub(crate) fn symbols(&self) -> Result<&crate::symbols::Symbols, LibcError> {
        self.loaded
            .as_ref()
            .map(|loaded| &loaded.symbols)
            .ok_or(LibcError::HandleClosed)
    }
}

impl Drop for LibcHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl core::fmt::Debug for LibcHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LibcHandle")
            .field("library", &self.library)
            .field("growth", &self.growth)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(unix)]
fn release(loaded: Loaded, library: &str) {
    if let Err(e) = loaded.library.close() {
        tracing::warn!(library, error = %e, "dlclose failed");
    }
}

#[cfg(not(unix))]
fn release(loaded: Loaded, _library: &str) {
    match loaded {}
}

#[cfg(unix)]
mod native_impl {
    use libc::{c_char, c_int, gid_t, group, passwd, pid_t, size_t, uid_t};

    use super::LibcHandle;
    use crate::error::LibcError;
    use crate::native::NativeCalls;

    // SAFETY (all methods): the symbols were resolved with matching
    // prototypes and stay loaded while `symbols()` succeeds.
    impl NativeCalls for LibcHandle {
        fn getuid(&self) -> Result<uid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.getuid)() })
        }

        fn geteuid(&self) -> Result<uid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.geteuid)() })
        }

        fn getgid(&self) -> Result<gid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.getgid)() })
        }

        fn getegid(&self) -> Result<gid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.getegid)() })
        }

        fn getpid(&self) -> Result<pid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.getpid)() })
        }

        fn getppid(&self) -> Result<pid_t, LibcError> {
            Ok(unsafe { (self.symbols()?.getppid)() })
        }

        unsafe fn gethostname(&self, name: *mut c_char, len: size_t) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.gethostname)(name, len) })
        }

        unsafe fn getgroups(&self, size: c_int, list: *mut gid_t) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.getgroups)(size, list) })
        }

        unsafe fn getpwuid_r(
            &self,
            uid: uid_t,
            pwd: *mut passwd,
            buf: *mut c_char,
            buflen: size_t,
            result: *mut *mut passwd,
        ) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.getpwuid_r)(uid, pwd, buf, buflen, result) })
        }

        unsafe fn getpwnam_r(
            &self,
            name: *const c_char,
            pwd: *mut passwd,
            buf: *mut c_char,
            buflen: size_t,
            result: *mut *mut passwd,
        ) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.getpwnam_r)(name, pwd, buf, buflen, result) })
        }

        unsafe fn getgrgid_r(
            &self,
            gid: gid_t,
            grp: *mut group,
            buf: *mut c_char,
            buflen: size_t,
            result: *mut *mut group,
        ) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.getgrgid_r)(gid, grp, buf, buflen, result) })
        }

        unsafe fn getgrnam_r(
            &self,
            name: *const c_char,
            grp: *mut group,
            buf: *mut c_char,
            buflen: size_t,
            result: *mut *mut group,
        ) -> Result<c_int, LibcError> {
            Ok(unsafe { (self.symbols()?.getgrnam_r)(name, grp, buf, buflen, result) })
        }
    }
}
