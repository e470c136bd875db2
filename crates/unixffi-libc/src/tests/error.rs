// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::LibcError;

#[test]
fn test_display_names_symbol_and_library() {
    let error = LibcError::MissingSymbol {
        symbol: "getpwuid_r",
        library: "libc.so.6".to_owned(),
    };

    assert_eq!(error.to_string(), "symbol `getpwuid_r` not found in `libc.so.6`");
}

#[test]
fn test_display_native_call_code() {
    let error = LibcError::NativeCall {
        symbol: "getgrgid_r",
        code: 34,
    };

    assert_eq!(error.to_string(), "`getgrgid_r` failed with code 34");
}

#[test]
fn test_display_unsupported_runtime() {
    let error = LibcError::UnsupportedRuntime {
        reason: "windows".to_owned(),
    };

    assert_eq!(error.to_string(), "native library access is not supported: windows");
}

#[cfg(unix)]
#[test]
fn test_is_not_found() {
    let missing = LibcError::NativeCall {
        symbol: "getgrgid_r",
        code: libc::ENOENT,
    };
    let no_such_process = LibcError::NativeCall {
        symbol: "getpwuid_r",
        code: libc::ESRCH,
    };
    let io = LibcError::NativeCall {
        symbol: "getpwuid_r",
        code: libc::EIO,
    };

    assert!(missing.is_not_found());
    assert!(no_such_process.is_not_found());
    assert!(!io.is_not_found());
    assert!(!LibcError::HandleClosed.is_not_found());
}
