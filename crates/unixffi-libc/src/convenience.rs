// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! One-shot queries that open and close the C library around a single call.
//!
//! Batch callers should [`open`](crate::open) once and use the methods on
//! [`LibcHandle`] instead, avoiding a load/unload per query.

use crate::binding::with_libc;
use crate::entry::{GroupEntry, PasswordEntry};
use crate::error::LibcError;
use crate::handle::LibcHandle;

/// Real user id of the calling process.
pub fn get_user_id() -> Result<u32, LibcError> {
    with_libc(LibcHandle::get_user_id)
}

/// Effective user id of the calling process.
pub fn get_effective_user_id() -> Result<u32, LibcError> {
    with_libc(LibcHandle::get_effective_user_id)
}

/// Real group id of the calling process.
pub fn get_group_id() -> Result<u32, LibcError> {
    with_libc(LibcHandle::get_group_id)
}

/// Effective group id of the calling process.
pub fn get_effective_group_id() -> Result<u32, LibcError> {
    with_libc(LibcHandle::get_effective_group_id)
}

/// Id of the calling process.
pub fn get_process_id() -> Result<i32, LibcError> {
    with_libc(LibcHandle::get_process_id)
}

/// Id of the parent process.
pub fn get_parent_process_id() -> Result<i32, LibcError> {
    with_libc(LibcHandle::get_parent_process_id)
}

/// Host name of the machine.
pub fn get_host_name() -> Result<String, LibcError> {
    with_libc(LibcHandle::get_host_name)
}

/// Supplementary group ids of the calling process.
pub fn get_group_ids() -> Result<Vec<u32>, LibcError> {
    with_libc(LibcHandle::get_group_ids)
}

/// Password database entry for `uid`.
pub fn get_password_entry(uid: u32) -> Result<PasswordEntry, LibcError> {
    with_libc(|handle| handle.get_password_entry(uid))
}

/// Password database entry for the login `name`.
pub fn get_password_entry_by_name(name: &str) -> Result<PasswordEntry, LibcError> {
    with_libc(|handle| handle.get_password_entry_by_name(name))
}

/// Group database entry for `gid`.
pub fn get_group_entry(gid: u32) -> Result<GroupEntry, LibcError> {
    with_libc(|handle| handle.get_group_entry(gid))
}

/// Group database entry for the group `name`.
pub fn get_group_entry_by_name(name: &str) -> Result<GroupEntry, LibcError> {
    with_libc(|handle| handle.get_group_entry_by_name(name))
}

/// Login name of `uid`.
pub fn get_user_name(uid: u32) -> Result<String, LibcError> {
    with_libc(|handle| handle.get_user_name(uid))
}

/// Name of the group `gid`.
pub fn get_group_name(gid: u32) -> Result<String, LibcError> {
    with_libc(|handle| handle.get_group_name(gid))
}
