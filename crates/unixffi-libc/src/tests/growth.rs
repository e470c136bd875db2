// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::error::LibcError;
use crate::growth::{Attempt, grow_retry};
use crate::options::GrowthPolicy;

/// Runs `grow_retry` against a call that succeeds once the size reaches
/// `threshold`, returning the result and every size tried.
fn run_until(policy: &GrowthPolicy, initial: usize, threshold: usize) -> (Result<usize, LibcError>, Vec<usize>) {
    let mut sizes = Vec::new();
    let result = grow_retry(policy, "test", initial, |size| {
        sizes.push(size);
        Ok(if size >= threshold {
            Attempt::Done(size)
        } else {
            Attempt::TooSmall
        })
    });

    (result, sizes)
}

#[test]
fn test_first_attempt_succeeds() {
    let policy = GrowthPolicy::default();
    let (result, sizes) = run_until(&policy, 64, 1);

    assert_eq!(result, Ok(64));
    assert_eq!(sizes, vec![64]);
}

#[test]
fn test_doubles_until_large_enough() {
    let policy = GrowthPolicy::new(16, 10, 1 << 20);
    let (result, sizes) = run_until(&policy, 16, 100);

    assert_eq!(result, Ok(128));
    assert_eq!(sizes, vec![16, 32, 64, 128]);
}

#[test]
fn test_exhaustion_reports_erange() {
    let policy = GrowthPolicy::new(1, 3, 1 << 20);
    let (result, sizes) = run_until(&policy, 1, usize::MAX);

    assert_eq!(
        result,
        Err(LibcError::NativeCall {
            symbol: "test",
            code: libc::ERANGE,
        })
    );
    assert_eq!(sizes, vec![1, 2, 4, 8]);
}

#[test]
fn test_max_size_caps_growth() {
    let policy = GrowthPolicy::new(16, 10, 100);
    let (result, sizes) = run_until(&policy, 16, 1000);

    assert!(result.is_err());
    assert_eq!(sizes, vec![16, 32, 64, 100]);
}

#[test]
fn test_reaching_max_size_exactly_succeeds() {
    let policy = GrowthPolicy::new(16, 10, 100);
    let (result, sizes) = run_until(&policy, 16, 100);

    assert_eq!(result, Ok(100));
    assert_eq!(sizes, vec![16, 32, 64, 100]);
}

#[test]
fn test_zero_initial_is_clamped_to_one() {
    let policy = GrowthPolicy::default();
    let (result, sizes) = run_until(&policy, 0, 2);

    assert_eq!(result, Ok(2));
    assert_eq!(sizes, vec![1, 2]);
}

#[test]
fn test_initial_above_max_is_clamped() {
    let policy = GrowthPolicy::new(16, 10, 32);
    let (_, sizes) = run_until(&policy, 4096, 1);

    assert_eq!(sizes, vec![32]);
}

#[test]
fn test_failure_stops_immediately() {
    let mut calls = 0;
    let result: Result<(), _> = grow_retry(&GrowthPolicy::default(), "getpwuid_r", 8, |_| {
        calls += 1;
        Ok(Attempt::Failed(libc::EIO))
    });

    assert_eq!(
        result,
        Err(LibcError::NativeCall {
            symbol: "getpwuid_r",
            code: libc::EIO,
        })
    );
    assert_eq!(calls, 1);
}

#[test]
fn test_caller_error_is_propagated() {
    let result: Result<(), _> = grow_retry(&GrowthPolicy::default(), "getuid", 8, |_| {
        Err(LibcError::HandleClosed)
    });

    assert_eq!(result, Err(LibcError::HandleClosed));
}

proptest! {
    #[test]
    fn prop_sizes_strictly_increase_and_terminate(
        initial in 1usize..4096,
        threshold in 1usize..(1 << 18),
        max_attempts in 0u32..12,
    ) {
        let policy = GrowthPolicy::new(initial, max_attempts, 1 << 20);
        let (result, sizes) = run_until(&policy, initial, threshold);

        prop_assert!(sizes.len() <= max_attempts as usize + 1);
        prop_assert!(sizes.windows(2).all(|pair| pair[0] < pair[1]));

        match result {
            Ok(size) => {
                prop_assert!(size >= threshold);
                prop_assert_eq!(Some(&size), sizes.last());
            }
            Err(_) => prop_assert!(sizes.iter().all(|&size| size < threshold)),
        }
    }
}
