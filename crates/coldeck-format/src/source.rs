//! Byte Sources
//!
//! A reader pulls its bytes through the `ByteSource` trait so the same open
//! and decode path serves an in-memory buffer and a file on disk. Both
//! implementations bounds-check the requested range up front, which makes a
//! short buffer and a short file fail with the same `TruncatedInput`.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use parking_lot::Mutex;

use coldeck_core::{Error, Result};

/// Random-access bytes backing an open reader
pub trait ByteSource: Send + Sync {
    /// Total length in bytes
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read exactly `len` bytes starting at `offset`
    fn read_at(&self, offset: u64, len: usize) -> Result<Bytes>;
}

fn check_range(total: u64, offset: u64, len: usize) -> Result<()> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= total => Ok(()),
        _ => Err(Error::TruncatedInput {
            needed: len,
            remaining: total.saturating_sub(offset) as usize,
        }),
    }
}

impl ByteSource for Bytes {
    fn len(&self) -> u64 {
        Bytes::len(self) as u64
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Bytes> {
        check_range(Bytes::len(self) as u64, offset, len)?;
        let start = offset as usize;
        // Zero-copy view into the shared buffer
        Ok(self.slice(start..start + len))
    }
}

/// File-backed source; the handle stays open behind a lock for the reader's
/// lifetime and the length is captured once at open
pub struct FileSource {
    file: Mutex<File>,
    len: u64,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            file: Mutex::new(file),
            len,
        })
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Bytes> {
        check_range(self.len, offset, len)?;
        let mut buf = vec![0u8; len];
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(&mut buf)?;
        Ok(Bytes::from(buf))
    }
}
