// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cell::{Cell, RefCell};
use core::mem::{align_of, size_of};
use core::ptr;
use std::ffi::CStr;

use libc::{c_char, c_int, gid_t, group, passwd, pid_t, size_t, uid_t};

use crate::error::LibcError;
use crate::native::NativeCalls;

/// Configurable behavior for [`MockLibc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockLibcBehaviour {
    /// Normal operation against the mock database.
    None,
    /// Buffer-taking calls report "too small" while the buffer is below the
    /// given size (bytes, or elements for `getgroups`).
    RangeErrorBelow(usize),
    /// Buffer-taking calls always report "too small".
    RangeErrorAlways,
    /// Buffer-taking calls fail with the given errno.
    FailWith(c_int),
    /// `gethostname` truncates silently (no NUL) when the buffer is short.
    HostNameTruncates,
    /// Every call behaves as if the handle were closed.
    Closed,
}

/// User record served by [`MockLibc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUser {
    /// Login name.
    pub name: String,
    /// Password placeholder.
    pub passwd: String,
    /// User id.
    pub uid: uid_t,
    /// Primary group id.
    pub gid: gid_t,
    /// GECOS field; `None` leaves `pw_gecos` null.
    pub gecos: Option<String>,
    /// Home directory.
    pub dir: String,
    /// Login shell.
    pub shell: String,
}

/// Group record served by [`MockLibc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGroup {
    /// Group name.
    pub name: String,
    /// Password placeholder.
    pub passwd: String,
    /// Group id.
    pub gid: gid_t,
    /// Member login names.
    pub members: Vec<String>,
}

/// Synthetic C library implementing [`NativeCalls`].
///
/// Writes `struct passwd` / `struct group` results into the caller's scratch
/// buffer the way a real `*_r` implementation does, and records every
/// buffer size it is handed.
pub struct MockLibc {
    /// Value returned by `getuid`.
    pub uid: uid_t,
    /// Value returned by `geteuid`.
    pub euid: uid_t,
    /// Value returned by `getgid`.
    pub gid: gid_t,
    /// Value returned by `getegid`.
    pub egid: gid_t,
    /// Value returned by `getpid`.
    pub pid: pid_t,
    /// Value returned by `getppid`.
    pub ppid: pid_t,
    /// Host name served by `gethostname`.
    pub host_name: String,
    /// Supplementary groups served by `getgroups`.
    pub group_ids: Vec<gid_t>,
    /// Password database.
    pub users: Vec<MockUser>,
    /// Group database.
    pub groups: Vec<MockGroup>,
    behaviour: MockLibcBehaviour,
    buffer_sizes: RefCell<Vec<usize>>,
    last_errno: Cell<c_int>,
}

impl MockLibc {
    /// Creates a mock with a small fixed database and the given behavior.
    pub fn new(behaviour: MockLibcBehaviour) -> Self {
        Self {
            uid: 1000,
            euid: 1000,
            gid: 1000,
            egid: 1000,
            pid: 4242,
            ppid: 1,
            host_name: "mockhost".to_owned(),
            group_ids: vec![1000, 10, 4],
            users: vec![
                MockUser {
                    name: "root".to_owned(),
                    passwd: "x".to_owned(),
                    uid: 0,
                    gid: 0,
                    gecos: Some("root".to_owned()),
                    dir: "/root".to_owned(),
                    shell: "/bin/bash".to_owned(),
                },
                MockUser {
                    name: "alice".to_owned(),
                    passwd: "x".to_owned(),
                    uid: 1000,
                    gid: 1000,
                    gecos: None,
                    dir: "/home/alice".to_owned(),
                    shell: "/bin/zsh".to_owned(),
                },
            ],
            groups: vec![
                MockGroup {
                    name: "root".to_owned(),
                    passwd: "x".to_owned(),
                    gid: 0,
                    members: vec![],
                },
                MockGroup {
                    name: "wheel".to_owned(),
                    passwd: "x".to_owned(),
                    gid: 10,
                    members: vec!["root".to_owned(), "alice".to_owned()],
                },
                MockGroup {
                    name: "alice".to_owned(),
                    passwd: "x".to_owned(),
                    gid: 1000,
                    members: vec![],
                },
            ],
            behaviour,
            buffer_sizes: RefCell::new(Vec::new()),
            last_errno: Cell::new(0),
        }
    }

    /// Changes the mock behavior at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockLibcBehaviour) {
        self.behaviour = behaviour;
    }

    /// Buffer sizes passed to buffer-taking calls, in call order.
    pub fn buffer_sizes(&self) -> Vec<usize> {
        self.buffer_sizes.borrow().clone()
    }

    /// Clears the recorded buffer sizes.
    pub fn reset_buffer_sizes(&self) {
        self.buffer_sizes.borrow_mut().clear();
    }

    fn check_open(&self) -> Result<(), LibcError> {
        match self.behaviour {
            MockLibcBehaviour::Closed => Err(LibcError::HandleClosed),
            _ => Ok(()),
        }
    }

    fn record(&self, size: usize) {
        self.buffer_sizes.borrow_mut().push(size);
    }

    fn forced_failure(&self) -> Option<c_int> {
        match self.behaviour {
            MockLibcBehaviour::FailWith(code) => Some(code),
            _ => None,
        }
    }

    fn forced_range_error(&self, size: usize) -> bool {
        match self.behaviour {
            MockLibcBehaviour::RangeErrorBelow(min) => size < min,
            MockLibcBehaviour::RangeErrorAlways => true,
            _ => false,
        }
    }

    fn fail_errno(&self, code: c_int) -> c_int {
        self.last_errno.set(code);
        -1
    }

    /// Shared body of `getpw*_r`.
    unsafe fn lookup_passwd(
        &self,
        user: Option<&MockUser>,
        pwd: *mut passwd,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut passwd,
    ) -> Result<c_int, LibcError> {
        self.check_open()?;
        self.record(buflen);

        // SAFETY: `result` is valid for writes per the `NativeCalls` contract.
        unsafe { result.write(ptr::null_mut()) };

        if let Some(code) = self.forced_failure() {
            return Ok(code);
        }

        if self.forced_range_error(buflen) {
            return Ok(libc::ERANGE);
        }

        let Some(user) = user else {
            return Ok(0);
        };

        let mut writer = ScratchWriter::new(buf, buflen);

        // SAFETY: `buf` is valid for `buflen` bytes per the contract.
        let Some(record) = (unsafe { write_user(&mut writer, user) }) else {
            return Ok(libc::ERANGE);
        };

        // SAFETY: `pwd` and `result` are valid for writes per the contract.
        unsafe {
            pwd.write(record);
            result.write(pwd);
        }

        Ok(0)
    }

    /// Shared body of `getgr*_r`.
    unsafe fn lookup_group(
        &self,
        entry: Option<&MockGroup>,
        grp: *mut group,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut group,
    ) -> Result<c_int, LibcError> {
        self.check_open()?;
        self.record(buflen);

        // SAFETY: `result` is valid for writes per the `NativeCalls` contract.
        unsafe { result.write(ptr::null_mut()) };

        if let Some(code) = self.forced_failure() {
            return Ok(code);
        }

        if self.forced_range_error(buflen) {
            return Ok(libc::ERANGE);
        }

        let Some(entry) = entry else {
            return Ok(0);
        };

        let mut writer = ScratchWriter::new(buf, buflen);

        // SAFETY: `buf` is valid for `buflen` bytes per the contract.
        let Some(record) = (unsafe { write_group(&mut writer, entry) }) else {
            return Ok(libc::ERANGE);
        };

        // SAFETY: `grp` and `result` are valid for writes per the contract.
        unsafe {
            grp.write(record);
            result.write(grp);
        }

        Ok(0)
    }
}

impl NativeCalls for MockLibc {
    fn getuid(&self) -> Result<uid_t, LibcError> {
        self.check_open()?;
        Ok(self.uid)
    }

    fn geteuid(&self) -> Result<uid_t, LibcError> {
        self.check_open()?;
        Ok(self.euid)
    }

    fn getgid(&self) -> Result<gid_t, LibcError> {
        self.check_open()?;
        Ok(self.gid)
    }

    fn getegid(&self) -> Result<gid_t, LibcError> {
        self.check_open()?;
        Ok(self.egid)
    }

    fn getpid(&self) -> Result<pid_t, LibcError> {
        self.check_open()?;
        Ok(self.pid)
    }

    fn getppid(&self) -> Result<pid_t, LibcError> {
        self.check_open()?;
        Ok(self.ppid)
    }

    unsafe fn gethostname(&self, name: *mut c_char, len: size_t) -> Result<c_int, LibcError> {
        self.check_open()?;
        self.record(len);

        if let Some(code) = self.forced_failure() {
            return Ok(self.fail_errno(code));
        }

        let bytes = self.host_name.as_bytes();

        if self.behaviour == MockLibcBehaviour::HostNameTruncates && len <= bytes.len() {
            // SAFETY: `name` is valid for `len` bytes per the contract.
            unsafe { ptr::copy_nonoverlapping(bytes.as_ptr(), name.cast::<u8>(), len) };
            return Ok(0);
        }

        if self.forced_range_error(len) || len <= bytes.len() {
            return Ok(self.fail_errno(libc::ENAMETOOLONG));
        }

        // SAFETY: `len > bytes.len()`, so the name and its NUL fit.
        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), name.cast::<u8>(), bytes.len());
            name.add(bytes.len()).write(0);
        }

        Ok(0)
    }

    unsafe fn getgroups(&self, size: c_int, list: *mut gid_t) -> Result<c_int, LibcError> {
        self.check_open()?;

        let count = self.group_ids.len() as c_int;

        if size == 0 {
            return Ok(count);
        }

        self.record(size as usize);

        if let Some(code) = self.forced_failure() {
            return Ok(self.fail_errno(code));
        }

        if self.forced_range_error(size as usize) || size < count {
            return Ok(self.fail_errno(libc::EINVAL));
        }

        // SAFETY: `list` holds `size >= count` elements per the contract.
        unsafe { ptr::copy_nonoverlapping(self.group_ids.as_ptr(), list, self.group_ids.len()) };

        Ok(count)
    }

    unsafe fn getpwuid_r(
        &self,
        uid: uid_t,
        pwd: *mut passwd,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut passwd,
    ) -> Result<c_int, LibcError> {
        let user = self.users.iter().find(|user| user.uid == uid);

        // SAFETY: forwarded to the caller.
        unsafe { self.lookup_passwd(user, pwd, buf, buflen, result) }
    }

    unsafe fn getpwnam_r(
        &self,
        name: *const c_char,
        pwd: *mut passwd,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut passwd,
    ) -> Result<c_int, LibcError> {
        // SAFETY: `name` is NUL-terminated per the contract.
        let name = unsafe { CStr::from_ptr(name) }.to_bytes();
        let user = self.users.iter().find(|user| user.name.as_bytes() == name);

        // SAFETY: forwarded to the caller.
        unsafe { self.lookup_passwd(user, pwd, buf, buflen, result) }
    }

    unsafe fn getgrgid_r(
        &self,
        gid: gid_t,
        grp: *mut group,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut group,
    ) -> Result<c_int, LibcError> {
        let entry = self.groups.iter().find(|entry| entry.gid == gid);

        // SAFETY: forwarded to the caller.
        unsafe { self.lookup_group(entry, grp, buf, buflen, result) }
    }

    unsafe fn getgrnam_r(
        &self,
        name: *const c_char,
        grp: *mut group,
        buf: *mut c_char,
        buflen: size_t,
        result: *mut *mut group,
    ) -> Result<c_int, LibcError> {
        // SAFETY: `name` is NUL-terminated per the contract.
        let name = unsafe { CStr::from_ptr(name) }.to_bytes();
        let entry = self.groups.iter().find(|entry| entry.name.as_bytes() == name);

        // SAFETY: forwarded to the caller.
        unsafe { self.lookup_group(entry, grp, buf, buflen, result) }
    }

    fn errno(&self) -> c_int {
        self.last_errno.get()
    }
}

/// Lays out `user` in the scratch buffer; `None` if it does not fit.
unsafe fn write_user(writer: &mut ScratchWriter, user: &MockUser) -> Option<passwd> {
    // SAFETY: forwarded to the caller.
    unsafe {
        let name = writer.push_str(&user.name)?;
        let password = writer.push_str(&user.passwd)?;
        let gecos = match &user.gecos {
            Some(gecos) => writer.push_str(gecos)?,
            None => ptr::null_mut(),
        };
        let dir = writer.push_str(&user.dir)?;
        let shell = writer.push_str(&user.shell)?;

        // An all-zero `passwd` is valid (null pointers, zero ids).
        let mut record: passwd = core::mem::zeroed();
        record.pw_name = name;
        record.pw_passwd = password;
        record.pw_uid = user.uid;
        record.pw_gid = user.gid;
        record.pw_gecos = gecos;
        record.pw_dir = dir;
        record.pw_shell = shell;

        Some(record)
    }
}

/// Lays out `entry` (member array first) in the scratch buffer; `None` if it
/// does not fit.
unsafe fn write_group(writer: &mut ScratchWriter, entry: &MockGroup) -> Option<group> {
    // SAFETY: forwarded to the caller.
    unsafe {
        let members = writer.push_pointer_array(entry.members.len() + 1)?;
        for (index, member) in entry.members.iter().enumerate() {
            let member = writer.push_str(member)?;
            members.add(index).write(member);
        }
        members.add(entry.members.len()).write(ptr::null_mut());

        let name = writer.push_str(&entry.name)?;
        let password = writer.push_str(&entry.passwd)?;

        // An all-zero `group` is valid.
        let mut record: group = core::mem::zeroed();
        record.gr_name = name;
        record.gr_passwd = password;
        record.gr_gid = entry.gid;
        record.gr_mem = members;

        Some(record)
    }
}

/// Bump allocator over a caller-supplied scratch buffer.
struct ScratchWriter {
    base: *mut u8,
    len: usize,
    used: usize,
}

impl ScratchWriter {
    fn new(base: *mut c_char, len: usize) -> Self {
        Self {
            base: base.cast::<u8>(),
            len,
            used: 0,
        }
    }

    /// Copies `text` plus a NUL terminator; `None` if it does not fit.
    unsafe fn push_str(&mut self, text: &str) -> Option<*mut c_char> {
        let needed = text.len() + 1;

        if self.len - self.used < needed {
            return None;
        }

        // SAFETY: `used + needed <= len`, inside the scratch buffer.
        unsafe {
            let dst = self.base.add(self.used);
            ptr::copy_nonoverlapping(text.as_ptr(), dst, text.len());
            dst.add(text.len()).write(0);
            self.used += needed;
            Some(dst.cast::<c_char>())
        }
    }

    /// Reserves an aligned array of `count` string pointers.
    unsafe fn push_pointer_array(&mut self, count: usize) -> Option<*mut *mut c_char> {
        let padding = self
            .base
            .wrapping_add(self.used)
            .align_offset(align_of::<*mut c_char>());
        let needed = padding + count * size_of::<*mut c_char>();

        if self.len - self.used < needed {
            return None;
        }

        // SAFETY: `used + needed <= len`; the start is pointer-aligned.
        unsafe {
            let dst = self.base.add(self.used + padding);
            self.used += needed;
            Some(dst.cast::<*mut c_char>())
        }
    }
}
