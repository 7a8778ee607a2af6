//! Coldeck Columnar File Format
//!
//! This crate implements the coldeck binary format for storing tabular data
//! column by column, with each column compressed as an independent deflate
//! block. Because every block is self-contained and its position is recorded
//! in the metadata section, a reader can materialize exactly the columns a
//! caller asks for without touching the rest of the file.
//!
//! ## File Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Header (32 bytes, offset 0)                                 │
//! │ - Magic bytes: "COLD" (4 bytes)                             │
//! │ - Version: 1 (4 bytes)                                      │
//! │ - Column count (4 bytes, > 0)                               │
//! │ - Row count (4 bytes)                                       │
//! │ - Metadata offset (8 bytes, writer emits 32)                │
//! │ - Data offset (8 bytes)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Column metadata (one block per column, variable size)       │
//! │ - Name length (4 bytes)                                     │
//! │ - Name (UTF-8, name-length bytes)                           │
//! │ - Data type code (1 byte)                                   │
//! │ - Compressed size (8 bytes)                                 │
//! │ - Uncompressed size (8 bytes)                               │
//! │ - Data offset (8 bytes, absolute)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Column 1 data (deflate block at its declared offset)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Column 2 data                                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │ ...                                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All multi-byte integers are little-endian. Metadata blocks are variable
//! size (the name is embedded), so they are parsed strictly sequentially;
//! data blocks sit back to back with no padding, each at the absolute offset
//! its metadata declares.
//!
//! ## Uncompressed Column Layout
//!
//! Inside a block, values are packed row-major for that one column:
//! ```text
//! Int32:   v0 v1 v2 ...            (4 bytes each)
//! Float64: v0 v1 v2 ...            (8 bytes each)
//! String:  len0 bytes0 len1 bytes1 (4-byte length + UTF-8, per value)
//! ```
//!
//! ## Why This Design?
//!
//! ### Per-Column Blocks
//! - Reading a 2-column projection of a 50-column file decompresses 2 blocks
//! - Columns compress well on their own (uniform type, repetitive values)
//! - A corrupt block poisons one column, not the file
//!
//! ### Sequential Metadata, Absolute Offsets
//! - Names are embedded, so blocks are variable size and read in order
//! - Offsets are absolute, so a column read is a single exact-range fetch
//!
//! ## Usage
//!
//! ### Writing
//! ```ignore
//! use coldeck_core::{Column, Table};
//! use coldeck_format::encode_table;
//!
//! let table = Table::new(vec![
//!     Column::int32("id", vec![1, 2, 3]),
//!     Column::string("name", names),
//! ])?;
//! let bytes = encode_table(&table)?;
//! std::fs::write("events.cdk", &bytes)?;
//! ```
//!
//! ### Reading
//! ```ignore
//! use coldeck_format::TableReader;
//!
//! let reader = TableReader::open("events.cdk")?;
//! println!("{} columns, {} rows", reader.column_count(), reader.row_count());
//!
//! // Full table
//! let table = reader.read_all()?;
//!
//! // Or only what you need - other columns are never decompressed
//! let names = reader.read_columns(&["name"])?;
//! ```

pub mod compress;
pub mod metadata;
pub mod reader;
pub mod source;
pub mod values;
pub mod writer;

pub use metadata::{ColumnMeta, FileHeader};
pub use reader::TableReader;
pub use source::{ByteSource, FileSource};
pub use writer::{encode_table, encode_table_with, TableWriter, WriteOptions};

/// Magic bytes identifying a coldeck file: "COLD"
pub const TABLE_MAGIC: [u8; 4] = [0x43, 0x4F, 0x4C, 0x44];

/// Version number for the file format
pub const FORMAT_VERSION: u32 = 1;

/// File header size (32 bytes)
pub const HEADER_SIZE: usize = 32;

/// Fixed portion of a column metadata block; the embedded name adds the rest
pub const META_BASE_SIZE: usize = 29;
