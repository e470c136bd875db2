// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::string::String;
use core::ffi::{CStr, c_char};
use core::marker::PhantomData;

use crate::error::PointerError;

/// Borrowed view over foreign memory.
///
/// The lifetime `'a` ties the pointer to the memory it reads from, so a
/// pointer into a scratch buffer cannot outlive that buffer.
#[derive(Clone, Copy)]
pub struct Pointer<'a> {
    addr: *const u8,
    len: Option<usize>,
    _marker: PhantomData<&'a [u8]>,
}

impl Pointer<'static> {
    /// Returns the null pointer.
    pub const fn null() -> Self {
        Self {
            addr: core::ptr::null(),
            len: None,
            _marker: PhantomData,
        }
    }
}

impl<'a> Pointer<'a> {
    /// Creates a bounded pointer over `slice`.
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self {
            addr: slice.as_ptr(),
            len: Some(slice.len()),
            _marker: PhantomData,
        }
    }

    /// Creates a pointer from a raw address returned by native code.
    ///
    /// A null `ptr` yields [`Pointer::null`] regardless of `len`.
    ///
    /// # Safety
    ///
    /// If `len` is `Some(n)`, `ptr` must be valid for reads of `n` bytes for
    /// `'a`. If `len` is `None`, every range later read through this pointer
    /// (including the scan for a terminator) must be valid for reads for `'a`.
    pub unsafe fn from_raw(ptr: *const u8, len: Option<usize>) -> Self {
        if ptr.is_null() {
            return Self {
                addr: core::ptr::null(),
                len: None,
                _marker: PhantomData,
            };
        }

        Self {
            addr: ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Returns true if the underlying address is zero.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.addr.is_null()
    }

    /// Returns the numeric address.
    #[inline]
    pub fn address(&self) -> usize {
        self.addr as usize
    }

    /// Returns the known length in bytes, if any.
    #[inline]
    pub fn len(&self) -> Option<usize> {
        self.len
    }

    /// Returns true if the pointer is bounded and has zero bytes available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == Some(0)
    }

    /// Returns the raw address.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.addr
    }

    /// Returns a pointer advanced by `offset` bytes.
    ///
    /// Advancing a bounded pointer past its end yields an empty bounded pointer.
    pub fn slice(&self, offset: usize) -> Pointer<'a> {
        if self.is_null() {
            return *self;
        }

        match self.len {
            Some(len) => {
                let offset = offset.min(len);
                Self {
                    addr: self.addr.wrapping_add(offset),
                    len: Some(len - offset),
                    _marker: PhantomData,
                }
            }
            None => Self {
                addr: self.addr.wrapping_add(offset),
                len: None,
                _marker: PhantomData,
            },
        }
    }

    /// Returns `length` bytes starting at `offset`.
    ///
    /// When `length` is `None` the remainder of a bounded pointer is returned.
    ///
    /// # Errors
    ///
    /// - [`PointerError::NullPointer`] if the pointer is null
    /// - [`PointerError::UnknownLength`] if the pointer is unbounded and no
    ///   `length` was supplied
    /// - [`PointerError::OutOfBounds`] if the range exceeds the known length
    pub fn to_buffer(&self, offset: usize, length: Option<usize>) -> Result<&'a [u8], PointerError> {
        if self.is_null() {
            return Err(PointerError::NullPointer);
        }

        let length = match (self.len, length) {
            (Some(available), requested) => {
                let length = requested.unwrap_or_else(|| available.saturating_sub(offset));
                let end = offset.checked_add(length);

                if end.is_none_or(|end| end > available) {
                    return Err(PointerError::OutOfBounds {
                        offset,
                        length,
                        available,
                    });
                }

                length
            }
            (None, Some(length)) => length,
            (None, None) => return Err(PointerError::UnknownLength),
        };

        // SAFETY: bounded pointers come from a slice covering `offset + length`
        // (checked above); unbounded pointers rely on the `from_raw` contract.
        Ok(unsafe { core::slice::from_raw_parts(self.addr.add(offset), length) })
    }

    /// Decodes the NUL-terminated byte string at `offset` as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD. A null pointer or an offset
    /// past the end of a bounded pointer decodes to `""`. A bounded pointer
    /// without a terminator decodes up to its end.
    pub fn to_c_string(&self, offset: usize) -> String {
        if self.is_null() {
            return String::new();
        }

        let bytes = match self.len {
            Some(_) => {
                let remainder = self.slice(offset);
                let bytes = remainder.bounded_bytes();
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                &bytes[..end]
            }
            None => {
                // SAFETY: unbounded pointers promise a readable, terminated
                // string per the `from_raw` contract.
                unsafe { CStr::from_ptr(self.addr.add(offset).cast::<c_char>()) }.to_bytes()
            }
        };

        String::from_utf8_lossy(bytes).into_owned()
    }

    /// Decodes the zero-terminated UTF-16LE string at `offset`.
    ///
    /// Unpaired surrogates are replaced with U+FFFD. Null handling matches
    /// [`Pointer::to_c_string`]; a trailing odd byte of a bounded pointer is
    /// ignored.
    pub fn to_wide_string(&self, offset: usize) -> String {
        if self.is_null() {
            return String::new();
        }

        let units: alloc::vec::Vec<u16> = match self.len {
            Some(_) => self
                .slice(offset)
                .bounded_bytes()
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .take_while(|&unit| unit != 0)
                .collect(),
            None => {
                let mut units = alloc::vec::Vec::new();
                let mut cursor = self.addr.wrapping_add(offset);

                loop {
                    // SAFETY: unbounded pointers promise readable memory up to
                    // and including the zero terminator.
                    let pair = unsafe { [cursor.read(), cursor.add(1).read()] };
                    let unit = u16::from_le_bytes(pair);

                    if unit == 0 {
                        break;
                    }

                    units.push(unit);
                    cursor = cursor.wrapping_add(2);
                }

                units
            }
        };

        char::decode_utf16(units)
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    fn bounded_bytes(&self) -> &'a [u8] {
        match self.len {
            // SAFETY: bounded pointers always cover `len` readable bytes.
            Some(len) if !self.is_null() => unsafe { core::slice::from_raw_parts(self.addr, len) },
            _ => &[],
        }
    }
}

impl core::fmt::Debug for Pointer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pointer")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("len", &self.len)
            .finish()
    }
}
