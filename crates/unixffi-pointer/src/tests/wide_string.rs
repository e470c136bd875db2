// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::Pointer;

fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    bytes.extend_from_slice(&[0, 0]);
    bytes
}

#[test]
fn test_null_decodes_to_empty() {
    assert_eq!(Pointer::null().to_wide_string(0), "");
}

#[test]
fn test_decodes_until_zero_unit() {
    let mut data = encode_utf16le("DESKTOP");
    data.extend(encode_utf16le("ignored"));

    assert_eq!(Pointer::from_slice(&data).to_wide_string(0), "DESKTOP");
}

#[test]
fn test_offset_in_bytes() {
    let data = encode_utf16le("abc");

    assert_eq!(Pointer::from_slice(&data).to_wide_string(2), "bc");
}

#[test]
fn test_surrogate_pairs() {
    let data = encode_utf16le("a\u{1F980}b");

    assert_eq!(Pointer::from_slice(&data).to_wide_string(0), "a\u{1F980}b");
}

#[test]
fn test_unpaired_surrogate_is_replaced() {
    let data = [0x00, 0xd8, b'x', 0x00, 0x00, 0x00];

    assert_eq!(Pointer::from_slice(&data).to_wide_string(0), "\u{fffd}x");
}

#[test]
fn test_zero_byte_inside_unit_does_not_terminate() {
    // 'A' is 0x0041, its high byte is zero.
    let data = [0x41, 0x00, 0x00, 0x01, 0x00, 0x00];

    assert_eq!(Pointer::from_slice(&data).to_wide_string(0), "A\u{100}");
}

#[test]
fn test_unterminated_bounded_ignores_odd_byte() {
    let data = [0x68, 0x00, 0x69, 0x00, 0x21];

    assert_eq!(Pointer::from_slice(&data).to_wide_string(0), "hi");
}

#[test]
fn test_unbounded_scans_to_terminator() {
    let data = encode_utf16le("wide");
    let ptr = unsafe { Pointer::from_raw(data.as_ptr(), None) };

    assert_eq!(ptr.to_wide_string(0), "wide");
}
