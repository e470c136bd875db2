// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::path::{Path, PathBuf};

use serial_test::serial;

use crate::options::{DEFAULT_LIBRARY, GrowthPolicy, LIBRARY_PATH_ENV, OpenOptions};

#[test]
fn test_default_growth_policy() {
    let policy = GrowthPolicy::default();

    assert_eq!(policy.initial_size, 1024);
    assert_eq!(policy.max_attempts, 10);
    assert_eq!(policy.max_size, 1 << 20);
}

#[test]
fn test_default_options_target_platform_library() {
    let options = OpenOptions::new();

    assert_eq!(options.library(), None);
    assert_eq!(options.library_target(), PathBuf::from(DEFAULT_LIBRARY));
    assert_eq!(options.growth(), GrowthPolicy::default());
}

#[test]
fn test_builder_overrides() {
    let growth = GrowthPolicy::new(64, 4, 4096);
    let options = OpenOptions::new()
        .with_library("/opt/libc/libc.so")
        .with_growth(growth);

    assert_eq!(options.library(), Some(Path::new("/opt/libc/libc.so")));
    assert_eq!(options.library_target(), PathBuf::from("/opt/libc/libc.so"));
    assert_eq!(options.growth(), growth);
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_glibc_default_library() {
    assert_eq!(DEFAULT_LIBRARY, "libc.so.6");
}

#[test]
#[serial(env)]
fn test_from_env_reads_library_path() {
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::set_var(LIBRARY_PATH_ENV, "/custom/libc.so") };
    let options = OpenOptions::from_env();
    unsafe { std::env::remove_var(LIBRARY_PATH_ENV) };

    assert_eq!(options.library(), Some(Path::new("/custom/libc.so")));
}

#[test]
#[serial(env)]
fn test_from_env_ignores_empty_value() {
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::set_var(LIBRARY_PATH_ENV, "") };
    let options = OpenOptions::from_env();
    unsafe { std::env::remove_var(LIBRARY_PATH_ENV) };

    assert_eq!(options.library(), None);
}

#[test]
#[serial(env)]
fn test_from_env_unset_uses_default() {
    // SAFETY: serialised with every other test touching the environment.
    unsafe { std::env::remove_var(LIBRARY_PATH_ENV) };

    assert_eq!(OpenOptions::from_env(), OpenOptions::new());
}
