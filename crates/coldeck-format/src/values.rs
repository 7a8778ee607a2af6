//! Column Value Serialization
//!
//! Converts between in-memory column vectors and the uncompressed block
//! layout. Fixed-width types are packed back to back with no per-value
//! framing; strings carry a little-endian u32 byte-length prefix followed by
//! UTF-8 bytes.
//!
//! Decoding is strict about sizes. A fixed-width block must be exactly
//! `row_count * width` bytes (`SizeMismatch` otherwise), and a string block
//! must hold exactly `row_count` values: running out early is
//! `TruncatedInput`, bytes left over after the last value is `TrailingBytes`.

use bytes::{Buf, BufMut};

use coldeck_core::codec;
use coldeck_core::{ColumnValues, DataType, Error, Result};

/// Serialize a column's values into the uncompressed block layout
pub fn serialize_values(values: &ColumnValues) -> Vec<u8> {
    match values {
        ColumnValues::Int32(items) => {
            let mut buf = Vec::with_capacity(items.len() * 4);
            for &value in items {
                buf.put_i32_le(value);
            }
            buf
        }
        ColumnValues::Float64(items) => {
            let mut buf = Vec::with_capacity(items.len() * 8);
            for &value in items {
                buf.put_f64_le(value);
            }
            buf
        }
        ColumnValues::String(items) => {
            let total: usize = items.iter().map(|s| 4 + s.len()).sum();
            let mut buf = Vec::with_capacity(total);
            for value in items {
                codec::put_string(&mut buf, value);
            }
            buf
        }
    }
}

/// Decode an uncompressed block back into `row_count` values
pub fn deserialize_values(
    data_type: DataType,
    data: &[u8],
    row_count: u32,
) -> Result<ColumnValues> {
    match data_type {
        DataType::Int32 => {
            check_fixed_size(data, row_count, 4)?;
            let mut cursor = data;
            let mut items = Vec::with_capacity(row_count as usize);
            for _ in 0..row_count {
                items.push(cursor.get_i32_le());
            }
            Ok(ColumnValues::Int32(items))
        }
        DataType::Float64 => {
            check_fixed_size(data, row_count, 8)?;
            let mut cursor = data;
            let mut items = Vec::with_capacity(row_count as usize);
            for _ in 0..row_count {
                items.push(cursor.get_f64_le());
            }
            Ok(ColumnValues::Float64(items))
        }
        DataType::String => {
            let mut cursor = data;
            // Every value carries at least its 4-byte prefix, which bounds
            // how many can fit regardless of what the header claims
            let cap = (row_count as usize).min(data.len() / 4);
            let mut items = Vec::with_capacity(cap);
            for _ in 0..row_count {
                items.push(codec::get_string(&mut cursor)?);
            }
            if cursor.has_remaining() {
                return Err(Error::TrailingBytes(cursor.remaining()));
            }
            Ok(ColumnValues::String(items))
        }
    }
}

fn check_fixed_size(data: &[u8], row_count: u32, width: u64) -> Result<()> {
    let expected = row_count as u64 * width;
    if data.len() as u64 != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: data.len() as u64,
        });
    }
    Ok(())
}
