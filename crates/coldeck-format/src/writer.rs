//! Table Writer - Columnar File Assembly
//!
//! Encoding is a single forward pass. Every column is serialized and
//! compressed first (on the rayon pool when enabled), which fixes all block
//! sizes; the metadata section size then follows from the column names, and
//! with it every absolute offset in the file. The writer emits the header,
//! the metadata blocks in column order, and the compressed blocks back to
//! back with no padding.
//!
//! The header always records `metadata_offset = 32` (metadata directly after
//! the header) and `data_offset = 32 + metadata section size`. Readers must
//! not assume either, but this writer never produces anything else.
//!
//! Two entry points cover the common shapes:
//! - `encode_table` / `encode_table_with` for a ready-made [`Table`]
//! - [`TableWriter`] for staging columns one at a time before `finish`

use bytes::BufMut;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use coldeck_core::{Column, DataType, Error, Result, Table};

use crate::metadata::{ColumnMeta, FileHeader};
use crate::{compress, values, FORMAT_VERSION, HEADER_SIZE, META_BASE_SIZE};

/// Options controlling how a table is encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Deflate level, 0 (stored) through 9 (best)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Compress columns on the rayon pool when there is more than one
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
            parallel: default_parallel(),
        }
    }
}

fn default_compression_level() -> u32 {
    6
}

fn default_parallel() -> bool {
    true
}

/// Encode a table with default options
pub fn encode_table(table: &Table) -> Result<Vec<u8>> {
    encode_table_with(table, &WriteOptions::default())
}

/// Encode a table with explicit options
///
/// The table's shape is revalidated here: the fields are public, so the
/// value may not have come through [`Table::new`].
pub fn encode_table_with(table: &Table, options: &WriteOptions) -> Result<Vec<u8>> {
    encode_columns(&table.columns, table.row_count, options)
}

/// Builds a file from columns staged one at a time
///
/// The first column fixes the row count; later columns must match it and
/// carry distinct names. `finish` consumes the writer and produces the
/// complete byte stream.
pub struct TableWriter {
    options: WriteOptions,
    columns: Vec<Column>,
    row_count: Option<u32>,
}

impl TableWriter {
    pub fn new() -> Self {
        Self::with_options(WriteOptions::default())
    }

    pub fn with_options(options: WriteOptions) -> Self {
        Self {
            options,
            columns: Vec::new(),
            row_count: None,
        }
    }

    /// Stage a column for the file
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if column.len() > u32::MAX as usize {
            return Err(Error::InvalidLayout(format!(
                "column '{}' has {} rows, above the u32 limit",
                column.name,
                column.len()
            )));
        }
        let actual = column.len() as u32;
        match self.row_count {
            None => self.row_count = Some(actual),
            Some(expected) if expected != actual => {
                return Err(Error::RowCountMismatch {
                    column: column.name.clone(),
                    expected,
                    actual,
                });
            }
            Some(_) => {}
        }
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn(column.name.clone()));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Number of columns staged so far
    pub fn column_count(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Row count fixed by the first staged column
    pub fn row_count(&self) -> Option<u32> {
        self.row_count
    }

    /// Serialize, compress, and assemble the complete file
    pub fn finish(self) -> Result<Vec<u8>> {
        encode_columns(
            &self.columns,
            self.row_count.unwrap_or(0),
            &self.options,
        )
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

struct EncodedColumn {
    name: String,
    data_type: DataType,
    uncompressed_size: u64,
    block: Vec<u8>,
}

fn encode_column(column: &Column, level: u32) -> Result<EncodedColumn> {
    let raw = values::serialize_values(&column.values);
    let block = compress::compress(&raw, level)?;
    Ok(EncodedColumn {
        name: column.name.clone(),
        data_type: column.data_type(),
        uncompressed_size: raw.len() as u64,
        block,
    })
}

fn encode_columns(columns: &[Column], row_count: u32, options: &WriteOptions) -> Result<Vec<u8>> {
    if columns.is_empty() {
        return Err(Error::InvalidColumnCount(0));
    }
    for column in columns {
        if column.len() as u64 != row_count as u64 {
            return Err(Error::RowCountMismatch {
                column: column.name.clone(),
                expected: row_count,
                actual: column.len().min(u32::MAX as usize) as u32,
            });
        }
    }
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn(column.name.clone()));
        }
    }

    let level = options.compression_level;
    let blocks: Vec<EncodedColumn> = if options.parallel && columns.len() > 1 {
        columns
            .par_iter()
            .map(|c| encode_column(c, level))
            .collect::<Result<_>>()?
    } else {
        columns
            .iter()
            .map(|c| encode_column(c, level))
            .collect::<Result<_>>()?
    };

    // Block sizes are now fixed, so every offset in the file is known
    let metadata_offset = HEADER_SIZE as u64;
    let metadata_len: u64 = blocks
        .iter()
        .map(|b| (META_BASE_SIZE + b.name.len()) as u64)
        .sum();
    let data_offset = metadata_offset + metadata_len;

    let mut metas = Vec::with_capacity(blocks.len());
    let mut position = data_offset;
    for b in &blocks {
        metas.push(ColumnMeta {
            name: b.name.clone(),
            data_type: b.data_type,
            compressed_size: b.block.len() as u64,
            uncompressed_size: b.uncompressed_size,
            data_offset: position,
        });
        position += b.block.len() as u64;
    }

    let header = FileHeader {
        version: FORMAT_VERSION,
        column_count: blocks.len() as u32,
        row_count,
        metadata_offset,
        data_offset,
    };

    let mut out = Vec::with_capacity(position as usize);
    header.encode(&mut out);
    for meta in &metas {
        meta.encode(&mut out);
    }
    for b in &blocks {
        out.put_slice(&b.block);
    }

    tracing::debug!(
        columns = header.column_count,
        rows = header.row_count,
        bytes = out.len(),
        level = level,
        "Encoded table"
    );

    Ok(out)
}
