// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use libc::{c_char, c_int, gid_t, group, passwd, pid_t, size_t, uid_t};

use crate::error::LibcError;

/// Raw native calls the facade is built on.
///
/// Each method mirrors one C symbol. The outer `Result` only reports
/// conditions on the caller's side of the boundary (for example
/// [`LibcError::HandleClosed`]); native return codes are passed through
/// untouched for the facade to interpret.
///
/// [`LibcHandle`](crate::LibcHandle) implements this over symbols resolved
/// from the loaded library.
pub trait NativeCalls {
    /// `getuid()`
    fn getuid(&self) -> Result<uid_t, LibcError>;

    /// `geteuid()`
    fn geteuid(&self) -> Result<uid_t, LibcError>;

    /// `getgid()`
    fn getgid(&self) -> Result<gid_t, LibcError>;

    /// `getegid()`
    fn getegid(&self) -> Result<gid_t, LibcError>;

    /// `getpid()`
    fn getpid(&self) -> Result<pid_t, LibcError>;

    /// `getppid()`
    fn getppid(&self) -> Result<pid_t, LibcError>;

    /// `gethostname(name, len)`
    ///
    /// # Safety
    ///
    /// `name` must be valid for writes of `len` bytes.
    unsafe fn gethostname(&self, name: *mut c_char, len: size_t) -> Result<c_int, LibcError>;

    /// `getgroups(size, list)`
    ///
    /// # Safety
    ///
    /// `list` must be valid for writes of `size` elements, or null when
    /// `size` is zero.
    unsafe fn getgroups(&self, size: c_int, list: *mut gid_t) -> Result<c_int, LibcError>;

    /// `getpwuid_r(uid, pwd, buf, buflen, result)`
    ///
    /// # Safety
    ///
    /// `pwd` and `result` must be valid for writes, `buf` for `buflen` bytes.
    unsafe fn getpwuid_r(
        &self,
        uid: uid_t,
        pwd: *mut passwd,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut passwd,
    ) -> Result<c_int, LibcError>;

    /// `getpwnam_r(name, pwd, buf, buflen, result)`
    ///
    /// # Safety
    ///
    /// As [`NativeCalls::getpwuid_r`]; `name` must be NUL-terminated.
    unsafe fn getpwnam_r(
        &self,
        name: *const c_char,
        pwd: *mut passwd,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut passwd,
    ) -> Result<c_int, LibcError>;

    /// `getgrgid_r(gid, grp, buf, buflen, result)`
    ///
    /// # Safety
    ///
    /// `grp` and `result` must be valid for writes, `buf` for `buflen` bytes.
    unsafe fn getgrgid_r(
        &self,
        gid: gid_t,
        grp: *mut group,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut group,
    ) -> Result<c_int, LibcError>;

    /// `getgrnam_r(name, grp, buf, buflen, result)`
    ///
    /// # Safety
    ///
    /// As [`NativeCalls::getgrgid_r`]; `name` must be NUL-terminated.
    unsafe fn getgrnam_r(
        &self,
        name: *const c_char,
        grp: *mut group,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut group,
    ) -> Result<c_int, LibcError>;

    /// errno left by the most recent failing call on this thread.
    fn errno(&self) -> c_int {
        std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
    }
}
