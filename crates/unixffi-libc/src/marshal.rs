// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Decoders for `struct passwd` and `struct group`.
//!
//! Layouts come from the `libc` definitions for the compilation target. The
//! string fields of a `*_r` result normally point into the caller's scratch
//! buffer; those are read as bounded views. Pointers elsewhere (static data
//! some implementations hand out) are read as raw C strings.

use libc::{c_char, group, passwd};
use unixffi_pointer::Pointer;

use crate::entry::{GroupEntry, PasswordEntry};

/// Resolves native pointers against a scratch buffer.
pub struct ScratchView<'a> {
    scratch: &'a [u8],
}

impl<'a> ScratchView<'a> {
    /// Creates a view over `scratch`.
    pub fn new(scratch: &'a [u8]) -> Self {
        Self { scratch }
    }

    /// Returns a [`Pointer`] for `ptr`.
    ///
    /// Addresses inside the scratch buffer become a bounded pointer over the
    /// rest of the buffer.
    ///
    /// # Safety
    ///
    /// `ptr` must be null, point into the scratch buffer, or point to a
    /// NUL-terminated string that stays valid for `'a`.
    pub unsafe fn pointer(&self, ptr: *const c_char) -> Pointer<'a> {
        if ptr.is_null() {
            return Pointer::null();
        }

        let base = self.scratch.as_ptr() as usize;
        let addr = ptr as usize;

        match addr.checked_sub(base) {
            Some(offset) if offset < self.scratch.len() => Pointer::from_slice(&self.scratch[offset..]),
            // SAFETY: forwarded to the caller.
            _ => unsafe { Pointer::from_raw(ptr.cast(), None) },
        }
    }

    /// Decodes the C string at `ptr`; null decodes to `""`.
    ///
    /// # Safety
    ///
    /// See [`ScratchView::pointer`].
    pub unsafe fn string(&self, ptr: *const c_char) -> String {
        // SAFETY: forwarded to the caller.
        unsafe { self.pointer(ptr) }.to_c_string(0)
    }

    /// Decodes a NULL-terminated array of C strings; a null array is empty.
    ///
    /// # Safety
    ///
    /// `list` must be null or point to a readable array terminated by a null
    /// entry, each entry satisfying [`ScratchView::pointer`].
    pub unsafe fn string_array(&self, list: *const *mut c_char) -> Vec<String> {
        let mut strings = Vec::new();

        if list.is_null() {
            return strings;
        }

        let mut index = 0;
        loop {
            // SAFETY: the array is readable up to its null terminator.
            let entry = unsafe { list.add(index).read() };

            if entry.is_null() {
                break;
            }

            // SAFETY: forwarded to the caller.
            strings.push(unsafe { self.string(entry) });
            index += 1;
        }

        strings
    }
}

/// Decodes a `struct passwd` filled by `getpwuid_r` / `getpwnam_r`.
///
/// # Safety
///
/// Every string field of `raw` must satisfy [`ScratchView::pointer`] for
/// `scratch`.
pub unsafe fn decode_passwd(raw: &passwd, scratch: &[u8]) -> PasswordEntry {
    let view = ScratchView::new(scratch);

    // SAFETY: forwarded to the caller.
    unsafe {
        PasswordEntry {
            name: view.string(raw.pw_name),
            passwd: view.string(raw.pw_passwd),
            uid: raw.pw_uid,
            gid: raw.pw_gid,
            gecos: view.string(raw.pw_gecos),
            dir: view.string(raw.pw_dir),
            shell: view.string(raw.pw_shell),
        }
    }
}

/// Decodes a `struct group` filled by `getgrgid_r` / `getgrnam_r`.
///
/// # Safety
///
/// Every string field of `raw` and `gr_mem` must satisfy
/// [`ScratchView::string_array`] for `scratch`.
pub unsafe fn decode_group(raw: &group, scratch: &[u8]) -> GroupEntry {
    let view = ScratchView::new(scratch);

    // SAFETY: forwarded to the caller.
    unsafe {
        GroupEntry {
            name: view.string(raw.gr_name),
            passwd: view.string(raw.gr_passwd),
            gid: raw.gr_gid,
            members: view.string_array(raw.gr_mem),
        }
    }
}
