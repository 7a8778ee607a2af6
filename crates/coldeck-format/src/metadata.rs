//! File Header and Column Metadata
//!
//! The fixed 32-byte header is decoded first and gates everything else: bad
//! magic, an unknown version, or a zero column count abort an open before
//! any metadata is touched. The metadata section that follows is a sequence
//! of variable-size blocks, one per column, in column order. Blocks embed
//! their name, so the section can only be walked front to back: each block's
//! name length determines where the next one starts.

use std::collections::HashMap;

use bytes::{Buf, BufMut};

use coldeck_core::codec;
use coldeck_core::{DataType, Error, Result};

use crate::{FORMAT_VERSION, HEADER_SIZE, META_BASE_SIZE, TABLE_MAGIC};

/// Fixed-size header at offset 0 of every file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u32,
    pub column_count: u32,
    pub row_count: u32,
    pub metadata_offset: u64,
    pub data_offset: u64,
}

impl FileHeader {
    pub fn encode(&self, buf: &mut impl BufMut) {
        buf.put_slice(&TABLE_MAGIC);
        buf.put_u32_le(self.version);
        buf.put_u32_le(self.column_count);
        buf.put_u32_le(self.row_count);
        buf.put_u64_le(self.metadata_offset);
        buf.put_u64_le(self.data_offset);
    }

    pub fn decode(buf: &mut impl Buf) -> Result<Self> {
        let magic = codec::get_exact(buf, 4)?;
        if magic != TABLE_MAGIC {
            return Err(Error::BadMagic);
        }

        let version = codec::get_u32_le(buf)?;
        if version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let column_count = codec::get_u32_le(buf)?;
        if column_count == 0 {
            return Err(Error::InvalidColumnCount(0));
        }

        let row_count = codec::get_u32_le(buf)?;
        let metadata_offset = codec::get_u64_le(buf)?;
        let data_offset = codec::get_u64_le(buf)?;

        if metadata_offset < HEADER_SIZE as u64 {
            return Err(Error::InvalidLayout(format!(
                "metadata offset {metadata_offset} overlaps the {HEADER_SIZE}-byte header"
            )));
        }
        if data_offset < metadata_offset {
            return Err(Error::InvalidLayout(format!(
                "data offset {data_offset} precedes metadata offset {metadata_offset}"
            )));
        }

        Ok(Self {
            version,
            column_count,
            row_count,
            metadata_offset,
            data_offset,
        })
    }
}

/// One column's metadata block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub data_type: DataType,
    /// Size of the deflate stream in the data section
    pub compressed_size: u64,
    /// Size of the serialized values before compression
    pub uncompressed_size: u64,
    /// Absolute file offset of this column's block
    pub data_offset: u64,
}

impl ColumnMeta {
    /// Encoded size of this block: fixed fields plus the embedded name
    pub fn encoded_len(&self) -> usize {
        META_BASE_SIZE + self.name.len()
    }

    pub fn encode(&self, buf: &mut impl BufMut) {
        codec::put_string(buf, &self.name);
        buf.put_u8(self.data_type.code());
        buf.put_u64_le(self.compressed_size);
        buf.put_u64_le(self.uncompressed_size);
        buf.put_u64_le(self.data_offset);
    }

    pub fn decode(buf: &mut impl Buf) -> Result<Self> {
        let name = codec::get_string(buf)?;
        let data_type = DataType::try_from(codec::get_u8(buf)?)?;
        let compressed_size = codec::get_u64_le(buf)?;
        let uncompressed_size = codec::get_u64_le(buf)?;
        let data_offset = codec::get_u64_le(buf)?;

        Ok(Self {
            name,
            data_type,
            compressed_size,
            uncompressed_size,
            data_offset,
        })
    }
}

/// Parse exactly `column_count` metadata blocks in sequence
pub fn decode_column_metas(buf: &mut impl Buf, column_count: u32) -> Result<Vec<ColumnMeta>> {
    // Each block is at least META_BASE_SIZE bytes, which bounds how many the
    // section can actually hold regardless of what the header claims
    let cap = (column_count as usize).min(buf.remaining() / META_BASE_SIZE);
    let mut metas = Vec::with_capacity(cap);
    for _ in 0..column_count {
        metas.push(ColumnMeta::decode(buf)?);
    }
    Ok(metas)
}

/// Parsed metadata for one open file: blocks in column order plus a
/// name-to-position map for lookup by either key
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    entries: Vec<ColumnMeta>,
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(entries: Vec<ColumnMeta>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (position, meta) in entries.iter().enumerate() {
            if by_name.insert(meta.name.clone(), position).is_some() {
                return Err(Error::DuplicateColumn(meta.name.clone()));
            }
        }
        Ok(Self { entries, by_name })
    }

    /// Position of a column by exact name match
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, position: usize) -> Option<&ColumnMeta> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[ColumnMeta] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> FileHeader {
        FileHeader {
            version: FORMAT_VERSION,
            column_count: 2,
            row_count: 100,
            metadata_offset: HEADER_SIZE as u64,
            data_offset: 96,
        }
    }

    // ---------------------------------------------------------------
    // Header
    // ---------------------------------------------------------------

    #[test]
    fn test_header_roundtrip() {
        let header = sample_header();
        let mut buf = Vec::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);

        let mut cursor = buf.as_slice();
        let decoded = FileHeader::decode(&mut cursor).unwrap();
        assert_eq!(decoded, header);
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn test_header_byte_layout() {
        let header = sample_header();
        let mut buf = Vec::new();
        header.encode(&mut buf);

        assert_eq!(&buf[0..4], b"COLD");
        assert_eq!(u32::from_le_bytes(buf[4..8].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(buf[8..12].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(buf[12..16].try_into().unwrap()), 100);
        assert_eq!(u64::from_le_bytes(buf[16..24].try_into().unwrap()), 32);
        assert_eq!(u64::from_le_bytes(buf[24..32].try_into().unwrap()), 96);
    }

    #[test]
    fn test_header_bad_magic() {
        let mut buf = Vec::new();
        sample_header().encode(&mut buf);
        buf[0] = b'X';

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::BadMagic)));
    }

    #[test]
    fn test_header_unsupported_version() {
        let mut header = sample_header();
        header.version = 2;
        let mut buf = Vec::new();
        header.encode(&mut buf);

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::UnsupportedVersion(2))));
    }

    #[test]
    fn test_header_zero_columns() {
        let mut header = sample_header();
        header.column_count = 0;
        let mut buf = Vec::new();
        header.encode(&mut buf);

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::InvalidColumnCount(0))));
    }

    #[test]
    fn test_header_zero_rows_is_valid() {
        let mut header = sample_header();
        header.row_count = 0;
        let mut buf = Vec::new();
        header.encode(&mut buf);

        let decoded = FileHeader::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.row_count, 0);
    }

    #[test]
    fn test_header_truncated() {
        let mut buf = Vec::new();
        sample_header().encode(&mut buf);
        buf.truncate(20);

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn test_header_metadata_offset_inside_header() {
        let mut header = sample_header();
        header.metadata_offset = 16;
        let mut buf = Vec::new();
        header.encode(&mut buf);

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_header_data_before_metadata() {
        let mut header = sample_header();
        header.metadata_offset = 64;
        header.data_offset = 40;
        let mut buf = Vec::new();
        header.encode(&mut buf);

        let result = FileHeader::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    // ---------------------------------------------------------------
    // Column metadata
    // ---------------------------------------------------------------

    fn sample_meta(name: &str, data_offset: u64) -> ColumnMeta {
        ColumnMeta {
            name: name.to_string(),
            data_type: DataType::Int32,
            compressed_size: 64,
            uncompressed_size: 400,
            data_offset,
        }
    }

    #[test]
    fn test_meta_roundtrip() {
        let meta = ColumnMeta {
            name: "température".to_string(),
            data_type: DataType::Float64,
            compressed_size: 123,
            uncompressed_size: 456,
            data_offset: 789,
        };
        let mut buf = Vec::new();
        meta.encode(&mut buf);
        assert_eq!(buf.len(), meta.encoded_len());

        let decoded = ColumnMeta::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, meta);
    }

    #[test]
    fn test_meta_encoded_len_counts_name_bytes() {
        // 12 characters, 13 bytes in UTF-8
        let meta = sample_meta("températures", 0);
        assert_eq!(meta.name.len(), 13);
        assert_eq!(meta.encoded_len(), META_BASE_SIZE + 13);
    }

    #[test]
    fn test_meta_sequential_decode() {
        let mut buf = Vec::new();
        sample_meta("id", 96).encode(&mut buf);
        sample_meta("name", 160).encode(&mut buf);
        sample_meta("score", 224).encode(&mut buf);

        let mut cursor = buf.as_slice();
        let metas = decode_column_metas(&mut cursor, 3).unwrap();
        assert_eq!(metas.len(), 3);
        assert_eq!(metas[0].name, "id");
        assert_eq!(metas[1].name, "name");
        assert_eq!(metas[2].name, "score");
        assert_eq!(metas[2].data_offset, 224);
        assert!(!cursor.has_remaining());
    }

    #[test]
    fn test_meta_unknown_type_code() {
        let mut buf = Vec::new();
        sample_meta("id", 96).encode(&mut buf);
        // Type code sits right after the 4-byte length and 2-byte name
        buf[6] = 9;

        let result = ColumnMeta::decode(&mut buf.as_slice());
        assert!(matches!(result, Err(Error::UnknownDataType(9))));
    }

    #[test]
    fn test_meta_truncated_section() {
        let mut buf = Vec::new();
        sample_meta("id", 96).encode(&mut buf);
        sample_meta("name", 160).encode(&mut buf);
        buf.truncate(buf.len() - 10);

        let result = decode_column_metas(&mut buf.as_slice(), 2);
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn test_meta_count_beyond_section() {
        let mut buf = Vec::new();
        sample_meta("id", 96).encode(&mut buf);

        let result = decode_column_metas(&mut buf.as_slice(), 2);
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));
    }

    // ---------------------------------------------------------------
    // Index
    // ---------------------------------------------------------------

    #[test]
    fn test_index_lookup() {
        let index = ColumnIndex::new(vec![
            sample_meta("id", 96),
            sample_meta("name", 160),
        ])
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.position("id"), Some(0));
        assert_eq!(index.position("name"), Some(1));
        assert_eq!(index.position("Name"), None);
        assert_eq!(index.position("missing"), None);
        assert_eq!(index.get(1).map(|m| m.data_offset), Some(160));
        assert_eq!(index.get(2).map(|m| m.data_offset), None);
    }

    #[test]
    fn test_index_rejects_duplicate_names() {
        let result = ColumnIndex::new(vec![
            sample_meta("id", 96),
            sample_meta("value", 160),
            sample_meta("id", 224),
        ]);
        assert!(matches!(result, Err(Error::DuplicateColumn(name)) if name == "id"));
    }

    #[test]
    fn test_index_empty() {
        let index = ColumnIndex::new(vec![]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.entries().len(), 0);
    }
}
