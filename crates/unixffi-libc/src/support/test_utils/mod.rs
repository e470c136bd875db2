// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Synthetic native layer for exercising the facade without a real libc.

mod mock_libc;

pub use mock_libc::{MockGroup, MockLibc, MockLibcBehaviour, MockUser};
