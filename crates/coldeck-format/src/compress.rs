//! Deflate Compression for Column Blocks
//!
//! Every column's serialized values are compressed as one independent raw
//! deflate stream. No dictionary or state is shared between columns - that
//! independence is what lets a reader decompress a single column without
//! touching any other block.
//!
//! Decompression is defensive on two fronts: the output read is capped at
//! one byte past the size the metadata declares, so a lying or hostile
//! stream cannot balloon memory, and the produced length must then match the
//! declared size exactly. Both failure modes surface as `CorruptBlock`.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use coldeck_core::{Error, Result};

/// Compress one column block at the given deflate level (0-9)
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress one column block, requiring exactly `expected_len` bytes out
pub fn decompress(data: &[u8], expected_len: u64) -> Result<Vec<u8>> {
    let decoder = DeflateDecoder::new(data);
    let mut out = Vec::new();

    // Cap the read one byte past the declared size so an overlong stream is
    // caught by the length check instead of growing without bound
    decoder
        .take(expected_len.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|e| Error::CorruptBlock(e.to_string()))?;

    if out.len() as u64 != expected_len {
        return Err(Error::CorruptBlock(format!(
            "decompressed to {} bytes, expected {}",
            out.len(),
            expected_len
        )));
    }

    Ok(out)
}
