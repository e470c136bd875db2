// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::Pointer;

#[test]
fn test_null_decodes_to_empty() {
    assert_eq!(Pointer::null().to_c_string(0), "");
    assert_eq!(Pointer::null().to_c_string(12), "");
}

#[test]
fn test_stops_at_first_nul() {
    let data = b"alice\0bob\0";
    let ptr = Pointer::from_slice(data);

    assert_eq!(ptr.to_c_string(0), "alice");
    assert_eq!(ptr.to_c_string(6), "bob");
}

#[test]
fn test_offset_inside_string() {
    let data = b"alice\0";

    assert_eq!(Pointer::from_slice(data).to_c_string(2), "ice");
}

#[test]
fn test_empty_string() {
    let data = b"\0tail\0";

    assert_eq!(Pointer::from_slice(data).to_c_string(0), "");
}

#[test]
fn test_unterminated_bounded_reads_to_end() {
    let data = b"host";

    assert_eq!(Pointer::from_slice(data).to_c_string(0), "host");
}

#[test]
fn test_offset_past_end_is_empty() {
    let data = b"host\0";

    assert_eq!(Pointer::from_slice(data).to_c_string(42), "");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let data = [b'a', 0xff, b'b', 0];

    assert_eq!(Pointer::from_slice(&data).to_c_string(0), "a\u{fffd}b");
}

#[test]
fn test_unbounded_scans_to_terminator() {
    let data = b"/bin/sh\0garbage";
    let ptr = unsafe { Pointer::from_raw(data.as_ptr(), None) };

    assert_eq!(ptr.to_c_string(0), "/bin/sh");
    assert_eq!(ptr.to_c_string(5), "sh");
}

#[test]
fn test_utf8_multibyte() {
    let data = "José\0".as_bytes();

    assert_eq!(Pointer::from_slice(data).to_c_string(0), "José");
}

proptest! {
    #[test]
    fn prop_bounded_and_unbounded_agree(
        text in "[^\\x00]{0,64}",
        tail in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut data = text.clone().into_bytes();
        data.push(0);
        data.extend_from_slice(&tail);

        let bounded = Pointer::from_slice(&data);
        let unbounded = unsafe { Pointer::from_raw(data.as_ptr(), None) };

        prop_assert_eq!(bounded.to_c_string(0), text.clone());
        prop_assert_eq!(unbounded.to_c_string(0), text);
    }

    #[test]
    fn prop_never_reads_past_bound(data in proptest::collection::vec(1u8..=255, 0..64)) {
        let decoded = Pointer::from_slice(&data).to_c_string(0);

        prop_assert_eq!(decoded, String::from_utf8_lossy(&data).into_owned());
    }
}
