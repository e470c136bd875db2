// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Typed queries over [`NativeCalls`].
//!
//! Every function here takes the native layer explicitly, so the same code
//! runs against a loaded library ([`LibcHandle`]) or a synthetic one in
//! tests. Calls that write into caller buffers go through the growth policy.

use core::mem::MaybeUninit;
use core::ptr;
use std::ffi::CString;

use libc::{c_char, c_int, gid_t};
use unixffi_pointer::Pointer;

use crate::entry::{GroupEntry, PasswordEntry};
use crate::error::LibcError;
use crate::growth::{Attempt, grow_retry};
use crate::handle::LibcHandle;
use crate::marshal::{decode_group, decode_passwd};
use crate::native::NativeCalls;
use crate::options::GrowthPolicy;

fn to_native_length(size: usize) -> Result<c_int, LibcError> {
    c_int::try_from(size).map_err(|_| LibcError::InvalidArgument {
        reason: "buffer length exceeds the native int range",
    })
}

fn to_c_name(name: &str) -> Result<CString, LibcError> {
    CString::new(name).map_err(|_| LibcError::InvalidArgument {
        reason: "name contains an interior NUL byte",
    })
}

/// Real user id of the calling process.
pub fn get_user_id<N: NativeCalls + ?Sized>(native: &N) -> Result<u32, LibcError> {
    native.getuid()
}

/// Effective user id of the calling process.
pub fn get_effective_user_id<N: NativeCalls + ?Sized>(native: &N) -> Result<u32, LibcError> {
    native.geteuid()
}

/// Real group id of the calling process.
pub fn get_group_id<N: NativeCalls + ?Sized>(native: &N) -> Result<u32, LibcError> {
    native.getgid()
}

/// Effective group id of the calling process.
pub fn get_effective_group_id<N: NativeCalls + ?Sized>(native: &N) -> Result<u32, LibcError> {
    native.getegid()
}

/// Id of the calling process.
pub fn get_process_id<N: NativeCalls + ?Sized>(native: &N) -> Result<i32, LibcError> {
    native.getpid()
}

/// Id of the parent of the calling process.
pub fn get_parent_process_id<N: NativeCalls + ?Sized>(native: &N) -> Result<i32, LibcError> {
    native.getppid()
}

/// Host name of the machine.
///
/// A failure with `ENAMETOOLONG` / `EINVAL`, or a result without a NUL
/// terminator (silent truncation), grows the buffer.
pub fn get_host_name<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
) -> Result<String, LibcError> {
    grow_retry(policy, "gethostname", policy.initial_size, |size| {
        let mut buf = vec![0u8; size];

        // SAFETY: `buf` is valid for `size` bytes.
        let rc = unsafe { native.gethostname(buf.as_mut_ptr().cast::<c_char>(), buf.len()) }?;

        if rc != 0 {
            let code = native.errno();

            return Ok(if code == libc::ENAMETOOLONG || code == libc::EINVAL {
                Attempt::TooSmall
            } else {
                Attempt::Failed(code)
            });
        }

        if !buf.contains(&0) {
            return Ok(Attempt::TooSmall);
        }

        Ok(Attempt::Done(Pointer::from_slice(&buf).to_c_string(0)))
    })
}

/// Supplementary group ids of the calling process.
///
/// The count is queried first; if membership grows between the two calls
/// (`EINVAL`), the list buffer grows.
pub fn get_group_ids<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
) -> Result<Vec<u32>, LibcError> {
    // SAFETY: a zero size with a null list only queries the count.
    let count = unsafe { native.getgroups(0, ptr::null_mut()) }?;

    if count < 0 {
        return Err(LibcError::NativeCall {
            symbol: "getgroups",
            code: native.errno(),
        });
    }

    let initial = (count as usize).max(1);

    grow_retry(policy, "getgroups", initial, |size| {
        let capacity = to_native_length(size)?;
        let mut list: Vec<gid_t> = vec![0; size];

        // SAFETY: `list` holds `capacity` elements.
        let rc = unsafe { native.getgroups(capacity, list.as_mut_ptr()) }?;

        if rc < 0 {
            let code = native.errno();

            return Ok(if code == libc::EINVAL {
                Attempt::TooSmall
            } else {
                Attempt::Failed(code)
            });
        }

        list.truncate(rc as usize);

        Ok(Attempt::Done(list))
    })
}

/// Runs one `*_r` database lookup with a growing scratch buffer.
fn lookup_entry<R, T>(
    policy: &GrowthPolicy,
    symbol: &'static str,
    mut invoke: impl FnMut(*mut R, *mut c_char, usize, *mut *mut R) -> Result<c_int, LibcError>,
    decode: impl Fn(&R, &[u8]) -> T,
) -> Result<T, LibcError> {
    grow_retry(policy, symbol, policy.initial_size, |size| {
        let mut record = MaybeUninit::<R>::zeroed();
        let mut scratch = vec![0u8; size];
        let mut result: *mut R = ptr::null_mut();

        let rc = invoke(
            record.as_mut_ptr(),
            scratch.as_mut_ptr().cast::<c_char>(),
            scratch.len(),
            &raw mut result,
        )?;

        match rc {
            0 if result.is_null() => Ok(Attempt::Failed(libc::ENOENT)),
            // SAFETY: on success `result` points at the record filled by the
            // call, which lives in this frame.
            0 => Ok(Attempt::Done(decode(unsafe { &*result }, &scratch))),
            libc::ERANGE => Ok(Attempt::TooSmall),
            code => Ok(Attempt::Failed(code)),
        }
    })
}

/// Password database entry for `uid`.
///
/// A missing entry is a [`LibcError::NativeCall`] for which
/// [`LibcError::is_not_found`] holds.
pub fn get_password_entry<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    uid: u32,
) -> Result<PasswordEntry, LibcError> {
    lookup_entry::<libc::passwd, _>(
        policy,
        "getpwuid_r",
        // SAFETY: the lookup helper passes valid record, scratch and result
        // pointers.
        |pwd, buf, len, result| unsafe { native.getpwuid_r(uid, pwd, buf, len, result) },
        // SAFETY: string fields of a successful lookup point into `scratch`
        // or at static data owned by the library.
        |raw, scratch| unsafe { decode_passwd(raw, scratch) },
    )
}

/// Password database entry for the login `name`.
pub fn get_password_entry_by_name<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    name: &str,
) -> Result<PasswordEntry, LibcError> {
    let name = to_c_name(name)?;

    lookup_entry::<libc::passwd, _>(
        policy,
        "getpwnam_r",
        // SAFETY: as in `get_password_entry`; `name` is NUL-terminated.
        |pwd, buf, len, result| unsafe { native.getpwnam_r(name.as_ptr(), pwd, buf, len, result) },
        // SAFETY: as in `get_password_entry`.
        |raw, scratch| unsafe { decode_passwd(raw, scratch) },
    )
}

/// Group database entry for `gid`.
///
/// A missing entry is a [`LibcError::NativeCall`] for which
/// [`LibcError::is_not_found`] holds.
pub fn get_group_entry<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    gid: u32,
) -> Result<GroupEntry, LibcError> {
    lookup_entry::<libc::group, _>(
        policy,
        "getgrgid_r",
        // SAFETY: the lookup helper passes valid record, scratch and result
        // pointers.
        |grp, buf, len, result| unsafe { native.getgrgid_r(gid, grp, buf, len, result) },
        // SAFETY: string fields and `gr_mem` of a successful lookup point into
        // `scratch` or at static data owned by the library.
        |raw, scratch| unsafe { decode_group(raw, scratch) },
    )
}

/// Group database entry for the group `name`.
pub fn get_group_entry_by_name<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    name: &str,
) -> Result<GroupEntry, LibcError> {
    let name = to_c_name(name)?;

    lookup_entry::<libc::group, _>(
        policy,
        "getgrnam_r",
        // SAFETY: as in `get_group_entry`; `name` is NUL-terminated.
        |grp, buf, len, result| unsafe { native.getgrnam_r(name.as_ptr(), grp, buf, len, result) },
        // SAFETY: as in `get_group_entry`.
        |raw, scratch| unsafe { decode_group(raw, scratch) },
    )
}

/// Login name of `uid`.
pub fn get_user_name<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    uid: u32,
) -> Result<String, LibcError> {
    get_password_entry(native, policy, uid).map(|entry| entry.name)
}

/// Name of the group `gid`.
pub fn get_group_name<N: NativeCalls + ?Sized>(
    native: &N,
    policy: &GrowthPolicy,
    gid: u32,
) -> Result<String, LibcError> {
    get_group_entry(native, policy, gid).map(|entry| entry.name)
}

impl LibcHandle {
    /// Real user id of the calling process.
    pub fn get_user_id(&self) -> Result<u32, LibcError> {
        get_user_id(self)
    }

    /// Effective user id of the calling process.
    pub fn get_effective_user_id(&self) -> Result<u32, LibcError> {
        get_effective_user_id(self)
    }

    /// Real group id of the calling process.
    pub fn get_group_id(&self) -> Result<u32, LibcError> {
        get_group_id(self)
    }

    /// Effective group id of the calling process.
    pub fn get_effective_group_id(&self) -> Result<u32, LibcError> {
        get_effective_group_id(self)
    }

    /// Id of the calling process.
    pub fn get_process_id(&self) -> Result<i32, LibcError> {
        get_process_id(self)
    }

    /// Id of the parent process.
    pub fn get_parent_process_id(&self) -> Result<i32, LibcError> {
        get_parent_process_id(self)
    }

    /// Host name of the machine.
    pub fn get_host_name(&self) -> Result<String, LibcError> {
        get_host_name(self, &self.growth())
    }

    /// Supplementary group ids of the calling process.
    pub fn get_group_ids(&self) -> Result<Vec<u32>, LibcError> {
        get_group_ids(self, &self.growth())
    }

    /// Password database entry for `uid`.
    pub fn get_password_entry(&self, uid: u32) -> Result<PasswordEntry, LibcError> {
        get_password_entry(self, &self.growth(), uid)
    }

    /// Password database entry for the login `name`.
    pub fn get_password_entry_by_name(&self, name: &str) -> Result<PasswordEntry, LibcError> {
        get_password_entry_by_name(self, &self.growth(), name)
    }

    /// Group database entry for `gid`.
    pub fn get_group_entry(&self, gid: u32) -> Result<GroupEntry, LibcError> {
        get_group_entry(self, &self.growth(), gid)
    }

    /// Group database entry for the group `name`.
    pub fn get_group_entry_by_name(&self, name: &str) -> Result<GroupEntry, LibcError> {
        get_group_entry_by_name(self, &self.growth(), name)
    }

    /// Login name of `uid`.
    pub fn get_user_name(&self, uid: u32) -> Result<String, LibcError> {
        get_user_name(self, &self.growth(), uid)
    }

    /// Name of the group `gid`.
    pub fn get_group_name(&self, gid: u32) -> Result<String, LibcError> {
        get_group_name(self, &self.growth(), gid)
    }
}
