// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # unixffi_libc
//!
//! Result-wrapped access to the host C library, loaded at runtime.
//!
//! The library is opened with `dlopen`, a fixed set of identity and database
//! symbols is resolved once, and every query returns a [`Result`] so that a
//! missing library or symbol, an unsupported host, or a native error code is
//! a value rather than a crash.
//!
//! ## Core Types
//!
//! - [`LibcHandle`]: an open library session with typed query methods
//! - [`LibraryBinding`]: how a class of host opens the library
//!   ([`PosixBinding`], [`UnsupportedBinding`])
//! - [`NativeCalls`]: the raw symbol seam the [`facade`] is written against
//! - [`PasswordEntry`] / [`GroupEntry`]: decoded database records
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(target_os = "linux")]
//! # fn example() -> Result<(), unixffi_libc::LibcError> {
//! let libc = unixffi_libc::open()?;
//!
//! let uid = libc.get_user_id()?;
//! match libc.get_password_entry(uid) {
//!     Ok(user) => assert_eq!(user.uid, uid),
//!     Err(e) if e.is_not_found() => {}
//!     Err(e) => return Err(e),
//! }
//!
//! // One-shot form: opens and closes around the call.
//! let pid = unixffi_libc::get_process_id()?;
//! assert!(pid > 0);
//! # Ok(())
//! # }
//! # #[cfg(target_os = "linux")]
//! # example().unwrap();
//! ```
//!
//! ## Buffer growth
//!
//! Calls that write into caller buffers (`gethostname`, `getgroups`,
//! `getpw*_r`, `getgr*_r`) start from [`GrowthPolicy::initial_size`] and
//! double on a range error, at most [`GrowthPolicy::max_attempts`] times.
//! Exhaustion is reported as [`LibcError::NativeCall`] with `ERANGE`.
//!
//! ## Platform Support
//!
//! POSIX targets only. Elsewhere [`open`] returns
//! [`LibcError::UnsupportedRuntime`] without attempting a load and the query
//! API is not compiled.
//!
//! ## Threading
//!
//! Calls block the calling thread and cannot be cancelled. A handle is `Send`
//! but not `Sync`.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod binding;
mod entry;
mod error;
mod handle;
mod options;
mod support;

#[cfg(unix)]
mod convenience;
#[cfg(unix)]
pub mod facade;
#[cfg(unix)]
mod growth;
#[cfg(unix)]
pub mod marshal;
#[cfg(unix)]
mod native;
#[cfg(unix)]
mod symbols;

#[cfg(unix)]
pub use binding::PosixBinding;
pub use binding::{LibraryBinding, UnsupportedBinding, detect, open, open_with, with_libc};
#[cfg(unix)]
pub use convenience::{
    get_effective_group_id, get_effective_user_id, get_group_entry, get_group_entry_by_name,
    get_group_id, get_group_ids, get_group_name, get_host_name, get_parent_process_id,
    get_password_entry, get_password_entry_by_name, get_process_id, get_user_id, get_user_name,
};
pub use entry::{GroupEntry, PasswordEntry};
pub use error::LibcError;
pub use handle::LibcHandle;
#[cfg(unix)]
pub use native::NativeCalls;
pub use options::{DEFAULT_LIBRARY, GrowthPolicy, LIBRARY_PATH_ENV, OpenOptions};
#[cfg(unix)]
pub use symbols::REQUIRED_SYMBOLS;

#[cfg(all(unix, any(test, feature = "test-utils")))]
pub use support::test_utils;
