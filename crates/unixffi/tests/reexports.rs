// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use unixffi::{LibcError, LibraryBinding, OpenOptions, Pointer, PointerError};

#[test]
fn test_pointer_reexport() {
    let data = b"unixffi\0";

    assert_eq!(Pointer::from_slice(data).to_c_string(0), "unixffi");
    assert_eq!(Pointer::null().to_buffer(0, None), Err(PointerError::NullPointer));
}

#[test]
fn test_unsupported_binding_reexport() {
    let binding = unixffi::unix::UnsupportedBinding::new("simulated");

    assert!(matches!(
        binding.open(&OpenOptions::new()),
        Err(LibcError::UnsupportedRuntime { .. })
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn test_with_libc_closes_after_call() {
    let pid = unixffi::with_libc(|libc| libc.get_process_id()).expect("Failed to get_process_id()");

    assert_eq!(pid, std::process::id() as i32);
}
