// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Grow-and-retry loop for calls writing into caller-supplied buffers.

use tracing::{trace, warn};

use crate::error::LibcError;
use crate::options::GrowthPolicy;

/// Outcome of a single native attempt with a given buffer size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Attempt<T> {
    /// The call succeeded.
    Done(T),
    /// The call reported that the buffer is too small.
    TooSmall,
    /// The call failed with an unrelated code.
    Failed(i32),
}

/// Calls `attempt` with strictly increasing sizes until it succeeds, fails,
/// or `policy` is exhausted.
///
/// Sizes start at `initial` (clamped to `1..=policy.max_size`) and double on
/// every [`Attempt::TooSmall`]. Exhaustion is reported as `ERANGE`.
pub(crate) fn grow_retry<T>(
    policy: &GrowthPolicy,
    symbol: &'static str,
    initial: usize,
    mut attempt: impl FnMut(usize) -> Result<Attempt<T>, LibcError>,
) -> Result<T, LibcError> {
    let max_size = policy.max_size.max(1);
    let mut size = initial.clamp(1, max_size);

    for round in 0..=policy.max_attempts {
        trace!(symbol, size, round, "native call with scratch buffer");

        match attempt(size)? {
            Attempt::Done(value) => return Ok(value),
            Attempt::Failed(code) => return Err(LibcError::NativeCall { symbol, code }),
            Attempt::TooSmall => {}
        }

        if size >= max_size {
            break;
        }

        size = size.saturating_mul(2).min(max_size);
    }

    warn!(symbol, size, "scratch buffer growth exhausted");

    Err(LibcError::NativeCall {
        symbol,
        code: libc::ERANGE,
    })
}
