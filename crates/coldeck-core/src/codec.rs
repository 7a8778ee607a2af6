//! Checked Little-Endian Byte Codec
//!
//! This module provides the primitive reads and writes every coldeck
//! structure is built from: fixed-width little-endian integers/floats and
//! length-prefixed UTF-8 strings.
//!
//! ## Why Checked Getters?
//! The raw `bytes::Buf` getters panic when the buffer runs out. File parsing
//! must never panic on malformed input, so every getter here verifies
//! `remaining()` first and returns `Error::TruncatedInput` instead. The write
//! side uses `BufMut`'s `put_*_le` calls directly - writing into a growable
//! buffer cannot fail - so only the string form gets a helper.
//!
//! ## String Encoding
//! A string is a 4-byte little-endian byte length (not character count)
//! followed by the raw UTF-8 bytes. No terminator, no padding. An empty
//! string is a zero length prefix with nothing after it.
//!
//! ## Usage
//! ```ignore
//! let mut buf = BytesMut::new();
//! buf.put_u32_le(42);
//! codec::put_string(&mut buf, "hello");
//!
//! let mut cursor = buf.as_ref();
//! assert_eq!(codec::get_u32_le(&mut cursor)?, 42);
//! assert_eq!(codec::get_string(&mut cursor)?, "hello");
//! ```

use bytes::{Buf, BufMut};

use crate::error::{Error, Result};

/// Fail with `TruncatedInput` unless `needed` bytes remain
fn ensure(buf: &impl Buf, needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(Error::TruncatedInput {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Read a single byte
pub fn get_u8(buf: &mut impl Buf) -> Result<u8> {
    ensure(buf, 1)?;
    Ok(buf.get_u8())
}

/// Read a little-endian u32
pub fn get_u32_le(buf: &mut impl Buf) -> Result<u32> {
    ensure(buf, 4)?;
    Ok(buf.get_u32_le())
}

/// Read a little-endian u64
pub fn get_u64_le(buf: &mut impl Buf) -> Result<u64> {
    ensure(buf, 8)?;
    Ok(buf.get_u64_le())
}

/// Read a little-endian i32
pub fn get_i32_le(buf: &mut impl Buf) -> Result<i32> {
    ensure(buf, 4)?;
    Ok(buf.get_i32_le())
}

/// Read a little-endian f64
pub fn get_f64_le(buf: &mut impl Buf) -> Result<f64> {
    ensure(buf, 8)?;
    Ok(buf.get_f64_le())
}

/// Read exactly `len` raw bytes
pub fn get_exact(buf: &mut impl Buf, len: usize) -> Result<Vec<u8>> {
    ensure(buf, len)?;
    let mut out = vec![0u8; len];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

/// Read a length-prefixed UTF-8 string
pub fn get_string(buf: &mut impl Buf) -> Result<String> {
    let len = get_u32_le(buf)? as usize;
    let raw = get_exact(buf, len)?;
    Ok(String::from_utf8(raw)?)
}

/// Write a string as a 4-byte little-endian length prefix plus UTF-8 bytes
pub fn put_string(buf: &mut impl BufMut, value: &str) {
    buf.put_u32_le(value.len() as u32);
    buf.put_slice(value.as_bytes());
}
