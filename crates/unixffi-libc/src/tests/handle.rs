// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::binding::open_with;
use crate::error::LibcError;
use crate::handle::LibcHandle;
use crate::options::{DEFAULT_LIBRARY, GrowthPolicy, OpenOptions};

fn open_host() -> LibcHandle {
    open_with(&OpenOptions::new()).expect("Failed to open host libc")
}

#[test]
fn test_identity_matches_direct_calls() {
    let handle = open_host();

    assert_eq!(handle.get_user_id(), Ok(unsafe { libc::getuid() }));
    assert_eq!(handle.get_effective_user_id(), Ok(unsafe { libc::geteuid() }));
    assert_eq!(handle.get_group_id(), Ok(unsafe { libc::getgid() }));
    assert_eq!(handle.get_effective_group_id(), Ok(unsafe { libc::getegid() }));
    assert_eq!(handle.get_process_id(), Ok(std::process::id() as i32));
    assert_eq!(handle.get_parent_process_id(), Ok(unsafe { libc::getppid() }));
}

#[test]
fn test_host_name_is_not_empty() {
    let handle = open_host();
    let host_name = handle.get_host_name().expect("Failed to get_host_name()");

    assert!(!host_name.is_empty());
    assert!(!host_name.contains('\0'));
}

#[test]
fn test_group_ids_round_trip_through_group_database() {
    let handle = open_host();
    let group_ids = handle.get_group_ids().expect("Failed to get_group_ids()");

    for gid in group_ids {
        match handle.get_group_entry(gid) {
            Ok(entry) => assert_eq!(entry.gid, gid),
            // Supplementary groups without a database entry are legal.
            Err(e) => assert!(e.is_not_found(), "unexpected error for gid {gid}: {e}"),
        }
    }
}

#[test]
fn test_small_initial_buffer_still_succeeds() {
    let options = OpenOptions::new().with_growth(GrowthPolicy::new(1, 20, 1 << 20));
    let handle = open_with(&options).expect("Failed to open host libc");

    let uid = handle.get_user_id().expect("Failed to get_user_id()");
    let host_name = handle.get_host_name().expect("Failed to get_host_name()");

    assert!(!host_name.is_empty());

    if let Ok(entry) = handle.get_password_entry(uid) {
        assert_eq!(entry.uid, uid);
    }
}

#[test]
fn test_close_is_idempotent() {
    let mut handle = open_host();

    assert!(!handle.is_closed());

    handle.close();
    handle.close();

    assert!(handle.is_closed());
}

#[test]
fn test_queries_after_close_fail() {
    let mut handle = open_host();
    handle.close();

    assert_eq!(handle.get_user_id(), Err(LibcError::HandleClosed));
    assert_eq!(handle.get_host_name(), Err(LibcError::HandleClosed));
    assert_eq!(handle.get_group_entry(0), Err(LibcError::HandleClosed));
}

#[test]
fn test_independent_handles() {
    let mut first = open_host();
    let second = open_host();

    first.close();

    assert!(first.is_closed());
    assert_eq!(second.get_process_id(), Ok(std::process::id() as i32));
}

#[test]
fn test_handle_moves_across_threads() {
    let handle = open_host();
    let expected = std::process::id() as i32;

    let pid = std::thread::spawn(move || handle.get_process_id())
        .join()
        .expect("Failed to join thread");

    assert_eq!(pid, Ok(expected));
}

#[test]
fn test_accessors_and_debug() {
    let mut handle = open_host();

    assert_eq!(handle.library(), DEFAULT_LIBRARY);
    assert_eq!(handle.growth(), GrowthPolicy::default());

    let open = format!("{handle:?}");
    assert!(open.contains("LibcHandle"));
    assert!(open.contains("closed: false"));

    handle.close();
    assert!(format!("{handle:?}").contains("closed: true"));
}
