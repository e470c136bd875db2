// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Symbol table resolved from the C library.

use libc::{c_char, c_int, gid_t, group, passwd, pid_t, size_t, uid_t};
use libloading::Library;
use tracing::trace;

use crate::error::LibcError;

type GetUidFn = unsafe extern "C" fn() -> uid_t;
type GetGidFn = unsafe extern "C" fn() -> gid_t;
type GetPidFn = unsafe extern "C" fn() -> pid_t;
type GetHostNameFn = unsafe extern "C" fn(*mut c_char, size_t) -> c_int;
type GetGroupsFn = unsafe extern "C" fn(c_int, *mut gid_t) -> c_int;
type GetPwUidFn =
    unsafe extern "C" fn(uid_t, *mut passwd, *mut c_char, size_t, *mut *mut passwd) -> c_int;
type GetPwNamFn =
    unsafe extern "C" fn(*const c_char, *mut passwd, *mut c_char, size_t, *mut *mut passwd) -> c_int;
type GetGrGidFn =
    unsafe extern "C" fn(gid_t, *mut group, *mut c_char, size_t, *mut *mut group) -> c_int;
type GetGrNamFn =
    unsafe extern "C" fn(*const c_char, *mut group, *mut c_char, size_t, *mut *mut group) -> c_int;

/// Names of every symbol resolved at open, in resolution order.
pub const REQUIRED_SYMBOLS: [&str; 12] = [
    "getuid",
    "geteuid",
    "getgid",
    "getegid",
    "getpid",
    "getppid",
    "gethostname",
    "getgroups",
    "getpwuid_r",
    "getpwnam_r",
    "getgrgid_r",
    "getgrnam_r",
];

/// Function pointers copied out of a [`Library`].
///
/// Only valid while the library they were resolved from stays loaded; the
/// handle keeps both in the same `Option` so they are released together.
#[derive(Clone, Copy)]
pub(crate) struct Symbols {
    pub(crate) getuid: GetUidFn,
    pub(crate) geteuid: GetUidFn,
    pub(crate) getgid: GetGidFn,
    pub(crate) getegid: GetGidFn,
    pub(crate) getpid: GetPidFn,
    pub(crate) getppid: GetPidFn,
    pub(crate) gethostname: GetHostNameFn,
    pub(crate) getgroups: GetGroupsFn,
    pub(crate) getpwuid_r: GetPwUidFn,
    pub(crate) getpwnam_r: GetPwNamFn,
    pub(crate) getgrgid_r: GetGrGidFn,
    pub(crate) getgrnam_r: GetGrNamFn,
}

impl Symbols {
    /// Resolves [`REQUIRED_SYMBOLS`] from `library`.
    pub(crate) fn resolve(library: &Library, name: &str) -> Result<Self, LibcError> {
        // SAFETY: each type alias matches the POSIX prototype of its symbol.
        unsafe {
            Ok(Self {
                getuid: lookup(library, name, "getuid")?,
                geteuid: lookup(library, name, "geteuid")?,
                getgid: lookup(library, name, "getgid")?,
                getegid: lookup(library, name, "getegid")?,
                getpid: lookup(library, name, "getpid")?,
                getppid: lookup(library, name, "getppid")?,
                gethostname: lookup(library, name, "gethostname")?,
                getgroups: lookup(library, name, "getgroups")?,
                getpwuid_r: lookup(library, name, "getpwuid_r")?,
                getpwnam_r: lookup(library, name, "getpwnam_r")?,
                getgrgid_r: lookup(library, name, "getgrgid_r")?,
                getgrnam_r: lookup(library, name, "getgrnam_r")?,
            })
        }
    }
}

/// # Safety
///
/// `T` must be the function pointer type of `symbol`.
unsafe fn lookup<T: Copy>(library: &Library, name: &str, symbol: &'static str) -> Result<T, LibcError> {
    // SAFETY: forwarded to the caller.
    let resolved = unsafe { library.get::<T>(symbol.as_bytes()) }.map_err(|_| {
        LibcError::MissingSymbol {
            symbol,
            library: name.to_owned(),
        }
    })?;

    trace!(symbol, library = name, "resolved symbol");

    Ok(*resolved)
}
