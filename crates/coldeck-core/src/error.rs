//! Error Types for Coldeck
//!
//! This module defines all error types that can occur while encoding or
//! decoding coldeck files.
//!
//! ## Error Categories
//!
//! ### Header Errors (abort `open`)
//! - `BadMagic`: File doesn't start with the expected magic bytes ("COLD")
//! - `UnsupportedVersion`: File was created by a format version we don't know
//! - `InvalidColumnCount`: Header declares zero columns
//!
//! ### Structural Errors
//! - `UnknownDataType`: Metadata declares a type code we don't recognize
//! - `DuplicateColumn`: The same column name appears twice
//! - `InvalidLayout`: Offset arithmetic in the header/metadata is inconsistent
//!
//! ### Payload Errors (abort one column's read)
//! - `TruncatedInput`: Fewer bytes available than a length field declares
//! - `TrailingBytes`: More bytes present than the row count accounts for
//! - `SizeMismatch`: Declared uncompressed size disagrees with type arithmetic
//! - `CorruptBlock`: Decompression failed or produced the wrong length
//! - `InvalidUtf8`: A column name or string value is not valid UTF-8
//!
//! ### Lookup Errors
//! - `UnknownColumn`: A requested column name doesn't exist in the file
//!
//! ### Table Construction Errors
//! - `RowCountMismatch`: A column's length disagrees with the table row count
//!
//! ## Usage
//! All fallible functions return `Result<T>` which is aliased to
//! `Result<T, Error>`. This allows using the `?` operator for error
//! propagation.
//!
//! ## Example
//! ```ignore
//! use coldeck_core::{Error, Result};
//!
//! fn check_magic(data: &[u8]) -> Result<()> {
//!     if &data[0..4] != b"COLD" {
//!         return Err(Error::BadMagic);
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad magic bytes")]
    BadMagic,

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid column count: {0}")]
    InvalidColumnCount(u32),

    #[error("Unknown data type code: {0}")]
    UnknownDataType(u8),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("Trailing bytes after last value: {0}")]
    TrailingBytes(usize),

    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Corrupt block: {0}")]
    CorruptBlock(String),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Row count mismatch in column '{column}': expected {expected}, got {actual}")]
    RowCountMismatch {
        column: String,
        expected: u32,
        actual: u32,
    },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
