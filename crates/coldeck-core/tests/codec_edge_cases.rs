//! Edge-case tests for the byte codec, data types, and table validation.

use bytes::{Buf, BufMut, BytesMut};
use coldeck_core::codec::{get_exact, get_string, get_u32_le, get_u64_le, put_string};
use coldeck_core::{Column, ColumnValues, DataType, Error, Table};

// ---------------------------------------------------------------
// Byte codec round-trips through the public surface
// ---------------------------------------------------------------

#[test]
fn codec_u32_max_roundtrip() {
    let mut buf = BytesMut::new();
    buf.put_u32_le(u32::MAX);
    let mut cursor = buf.as_ref();
    assert_eq!(get_u32_le(&mut cursor).unwrap(), u32::MAX);
}

#[test]
fn codec_u64_max_roundtrip() {
    let mut buf = BytesMut::new();
    buf.put_u64_le(u64::MAX);
    let mut cursor = buf.as_ref();
    assert_eq!(get_u64_le(&mut cursor).unwrap(), u64::MAX);
}

#[test]
fn codec_rejects_empty_buffer() {
    let data: &[u8] = &[];
    let mut cursor = data;
    assert!(matches!(
        get_u32_le(&mut cursor),
        Err(Error::TruncatedInput {
            needed: 4,
            remaining: 0
        })
    ));
}

#[test]
fn codec_string_with_exact_boundary() {
    let mut buf = BytesMut::new();
    put_string(&mut buf, "abc");
    // 4-byte prefix + 3 payload bytes, nothing more
    assert_eq!(buf.len(), 7);

    let mut cursor = buf.as_ref();
    assert_eq!(get_string(&mut cursor).unwrap(), "abc");
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn codec_string_declared_longer_than_buffer() {
    let mut buf = BytesMut::new();
    buf.put_u32_le(1_000_000);
    buf.put_slice(b"tiny");

    let mut cursor = buf.as_ref();
    assert!(matches!(
        get_string(&mut cursor),
        Err(Error::TruncatedInput {
            needed: 1_000_000,
            remaining: 4
        })
    ));
}

#[test]
fn codec_get_exact_zero_len() {
    let data = [1u8, 2];
    let mut cursor = &data[..];
    let empty = get_exact(&mut cursor, 0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(cursor.remaining(), 2);
}

// ---------------------------------------------------------------
// Data type codes
// ---------------------------------------------------------------

#[test]
fn data_type_codes_are_stable() {
    // On-disk codes; changing these breaks every existing file
    assert_eq!(DataType::Int32.code(), 1);
    assert_eq!(DataType::Float64.code(), 2);
    assert_eq!(DataType::String.code(), 3);
}

#[test]
fn data_type_round_trips_through_code() {
    for dt in [DataType::Int32, DataType::Float64, DataType::String] {
        assert_eq!(DataType::try_from(dt.code()).unwrap(), dt);
    }
}

#[test]
fn data_type_zero_is_unknown() {
    assert!(matches!(
        DataType::try_from(0),
        Err(Error::UnknownDataType(0))
    ));
}

// ---------------------------------------------------------------
// Table shape validation
// ---------------------------------------------------------------

#[test]
fn table_single_column() {
    let table = Table::new(vec![Column::float64("v", vec![0.25, 0.5])]).unwrap();
    assert_eq!(table.row_count, 2);
    assert_eq!(table.column_count(), 1);
}

#[test]
fn table_preserves_column_order() {
    let table = Table::new(vec![
        Column::string("z", vec!["1".to_string()]),
        Column::int32("a", vec![1]),
        Column::float64("m", vec![1.0]),
    ])
    .unwrap();

    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
}

#[test]
fn table_mismatched_lengths_name_the_column() {
    let err = Table::new(vec![
        Column::int32("good", vec![1, 2]),
        Column::string("bad", vec!["only-one".to_string()]),
    ])
    .unwrap_err();

    match err {
        Error::RowCountMismatch {
            column,
            expected,
            actual,
        } => {
            assert_eq!(column, "bad");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected RowCountMismatch, got {other:?}"),
    }
}

#[test]
fn table_empty_strings_are_values() {
    let table = Table::new(vec![Column::string(
        "s",
        vec!["".to_string(), "x".to_string(), "".to_string()],
    )])
    .unwrap();
    assert_eq!(table.row_count, 3);
    match &table.columns[0].values {
        ColumnValues::String(v) => assert_eq!(v[0], ""),
        _ => panic!("wrong variant"),
    }
}

#[test]
fn error_messages_are_descriptive() {
    let msg = Error::UnknownColumn("salary".to_string()).to_string();
    assert!(msg.contains("salary"));

    let msg = Error::TruncatedInput {
        needed: 8,
        remaining: 3,
    }
    .to_string();
    assert!(msg.contains('8') && msg.contains('3'));

    let msg = Error::SizeMismatch {
        expected: 40,
        actual: 39,
    }
    .to_string();
    assert!(msg.contains("40") && msg.contains("39"));
}
