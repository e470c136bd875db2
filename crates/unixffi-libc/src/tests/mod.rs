// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod error;
mod options;

#[cfg(unix)]
mod growth;
#[cfg(target_os = "linux")]
mod handle;
