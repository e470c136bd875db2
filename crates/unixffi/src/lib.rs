// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # unixffi
//!
//! Host C library access without link-time coupling.
//!
//! The C library is opened at runtime and every native failure comes back as
//! a [`Result`]: a missing library, a missing symbol, an unsupported host or
//! an errno code. Memory handed back by native calls is read through
//! [`Pointer`], which never dereferences null.
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(target_os = "linux")]
//! # fn example() -> Result<(), unixffi::LibcError> {
//! let libc = unixffi::open()?;
//!
//! let uid = libc.get_user_id()?;
//! let host = libc.get_host_name()?;
//! let groups = libc.get_group_ids()?;
//!
//! match libc.get_user_name(uid) {
//!     Ok(name) => println!("{name}@{host} in {} groups", groups.len()),
//!     Err(e) if e.is_not_found() => println!("uid {uid} has no passwd entry"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! # #[cfg(target_os = "linux")]
//! # example().unwrap();
//! ```
//!
//! # Crates
//!
//! - [`unix`]: library loading, the binding registry and the typed queries
//! - [`pointer`]: bounded and unbounded views over foreign memory
//!
//! # Overriding the library
//!
//! [`open`] honours the `UNIXFFI_LIBC_PATH` environment variable. Use
//! [`open_with`] and [`OpenOptions`] to pass a path or a [`GrowthPolicy`]
//! explicitly.
//!
//! # Platform support
//!
//! | Platform | Support |
//! |----------|---------|
//! | Linux (glibc, musl) | Full |
//! | macOS | Full |
//! | FreeBSD and other POSIX | Full |
//! | Windows | `open` returns `UnsupportedRuntime` |
//!
//! # License
//!
//! GPL-3.0-only

pub mod support;

pub use unixffi_libc as unix;
pub use unixffi_pointer as pointer;

pub use unixffi_libc::{
    GroupEntry, GrowthPolicy, LibcError, LibcHandle, LibraryBinding, OpenOptions, PasswordEntry,
    detect, open, open_with, with_libc,
};
pub use unixffi_pointer::{Pointer, PointerError};
