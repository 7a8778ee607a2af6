#![no_main]

use bytes::Bytes;
use coldeck_format::TableReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to the table reader.
    // The reader should handle all malformed inputs gracefully:
    // - Invalid magic bytes
    // - Truncated headers and metadata sections
    // - Offsets pointing outside the input
    // - Unknown type codes and duplicate column names
    // - Invalid deflate data
    // - Lying compressed/uncompressed sizes
    let bytes = Bytes::copy_from_slice(data);

    if let Ok(reader) = TableReader::new(bytes) {
        // If the open succeeded, every read path must stay panic-free
        let _ = reader.row_count();
        let _ = reader.column_count();
        let columns = reader.list_columns();
        let _ = reader.read_all();

        if let Some((name, _)) = columns.first() {
            let _ = reader.read_columns(&[name.as_str()]);
        }
        if let Some((name, _)) = columns.last() {
            let _ = reader.read_columns(&[name.as_str(), name.as_str()]);
        }
        let _ = reader.read_columns(&["no such column"]);
        let _ = reader.read_columns(&[]);
    }
});
