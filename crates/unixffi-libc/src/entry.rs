// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// A record from the password database (`struct passwd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordEntry {
    /// Login name.
    pub name: String,
    /// Password placeholder (usually `x` or `*`).
    pub passwd: String,
    /// User id.
    pub uid: u32,
    /// Primary group id.
    pub gid: u32,
    /// Comment / GECOS field. Empty when the platform leaves it unset.
    pub gecos: String,
    /// Home directory.
    pub dir: String,
    /// Login shell.
    pub shell: String,
}

/// A record from the group database (`struct group`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupEntry {
    /// Group name.
    pub name: String,
    /// Password placeholder.
    pub passwd: String,
    /// Group id.
    pub gid: u32,
    /// Member login names, in database order.
    pub members: Vec<String>,
}
