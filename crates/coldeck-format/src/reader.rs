//! Table Reader - Selective Column Access
//!
//! Opening a reader touches only the header and the metadata section. The
//! header is decoded from the first 32 bytes and gates everything: bad
//! magic, an unsupported version, or a zero column count fail the open and
//! no metadata is read. The metadata section is then parsed into a
//! [`ColumnIndex`], after which the reader knows every column's name, type,
//! and block location without having read any data.
//!
//! Column data is fetched lazily. `read_columns` resolves names against the
//! index, reads exactly the requested blocks from the source, and
//! decompresses them independently; blocks for unrequested columns are never
//! read. A failure inside one column's block fails that read call only - the
//! reader itself stays open and other columns remain readable, because every
//! block is a self-contained deflate stream.
//!
//! [`ColumnIndex`]: crate::metadata::ColumnIndex

use std::path::Path;

use bytes::Bytes;
use rayon::prelude::*;

use coldeck_core::{Column, DataType, Error, Result, Table};

use crate::metadata::{decode_column_metas, ColumnIndex, FileHeader};
use crate::source::{ByteSource, FileSource};
use crate::{compress, values, HEADER_SIZE};

/// Reads tables from an encoded buffer, file, or custom byte source
pub struct TableReader {
    source: Box<dyn ByteSource>,
    header: FileHeader,
    index: ColumnIndex,
}

impl TableReader {
    /// Open an in-memory buffer
    pub fn new(data: Bytes) -> Result<Self> {
        Self::from_source(Box::new(data))
    }

    /// Open a file on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_source(Box::new(FileSource::open(path)?))
    }

    /// Open any byte source
    ///
    /// Reads the header and the full metadata section, validates both, and
    /// builds the column index. No column data is read.
    pub fn from_source(source: Box<dyn ByteSource>) -> Result<Self> {
        let header_bytes = source.read_at(0, HEADER_SIZE)?;
        let mut cursor = header_bytes.as_ref();
        let header = FileHeader::decode(&mut cursor)?;

        // The gap between the two offsets is the whole metadata section;
        // slack after the last block is tolerated, the walk below consumes
        // exactly column_count blocks
        let metadata_len = (header.data_offset - header.metadata_offset) as usize;
        let metadata_bytes = source.read_at(header.metadata_offset, metadata_len)?;
        let mut cursor = metadata_bytes.as_ref();
        let metas = decode_column_metas(&mut cursor, header.column_count)?;
        let index = ColumnIndex::new(metas)?;

        tracing::debug!(
            columns = header.column_count,
            rows = header.row_count,
            source_bytes = source.len(),
            "Opened table"
        );

        Ok(Self {
            source,
            header,
            index,
        })
    }

    /// Rows in every column of this file
    pub fn row_count(&self) -> u32 {
        self.header.row_count
    }

    /// Columns in this file
    pub fn column_count(&self) -> u32 {
        self.header.column_count
    }

    /// Format version recorded in the header
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// The decoded file header
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Column names and types in file order, without touching any data
    pub fn list_columns(&self) -> Vec<(String, DataType)> {
        self.index
            .entries()
            .iter()
            .map(|meta| (meta.name.clone(), meta.data_type))
            .collect()
    }

    /// Read every column
    pub fn read_all(&self) -> Result<Table> {
        let positions: Vec<usize> = (0..self.index.len()).collect();
        self.read_positions(&positions)
    }

    /// Read only the named columns
    ///
    /// Names resolve by exact match and any unknown name fails the whole
    /// call with `UnknownColumn`. Duplicate requests collapse to one read,
    /// and the result is in file order regardless of request order. Blocks
    /// for columns not named here are never read or decompressed.
    pub fn read_columns(&self, names: &[&str]) -> Result<Table> {
        let mut positions = Vec::with_capacity(names.len());
        for &name in names {
            let position = self
                .index
                .position(name)
                .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
        positions.sort_unstable();

        tracing::debug!(
            requested = names.len(),
            resolved = positions.len(),
            "Selective column read"
        );

        self.read_positions(&positions)
    }

    fn read_positions(&self, positions: &[usize]) -> Result<Table> {
        let columns: Vec<Column> = if positions.len() > 1 {
            positions
                .par_iter()
                .map(|&p| self.read_column_at(p))
                .collect::<Result<_>>()?
        } else {
            positions
                .iter()
                .map(|&p| self.read_column_at(p))
                .collect::<Result<_>>()?
        };

        Ok(Table {
            columns,
            row_count: self.header.row_count,
        })
    }

    /// Fetch, decompress, and decode one column's block
    fn read_column_at(&self, position: usize) -> Result<Column> {
        let meta = self.index.get(position).ok_or_else(|| {
            Error::InvalidLayout(format!("column position {position} out of range"))
        })?;

        let block = self
            .source
            .read_at(meta.data_offset, meta.compressed_size as usize)?;
        let raw = compress::decompress(&block, meta.uncompressed_size)?;
        let values = values::deserialize_values(meta.data_type, &raw, self.header.row_count)?;

        Ok(Column {
            name: meta.name.clone(),
            values,
        })
    }
}
