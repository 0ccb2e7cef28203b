//! Buffered copy strategy
//!
//! This module provides the BufferedCopy implementation that opens the file, reads
//! exactly the probed number of bytes into a freshly allocated buffer, and appends a
//! NUL terminator. The handle is closed before the content is handed back.

use crate::error::{BenchError, Result};
use crate::strategy::{Content, ReadStrategy, SourceFile};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Opens the byte stream a [`BufferedCopy`] reads from.
pub trait SourceOpener {
    type Reader: Read;

    fn open(&self, path: &Path) -> io::Result<Self::Reader>;
}

/// Opens sources from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl SourceOpener for FsOpener {
    type Reader = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

/// Read-into-memory strategy
///
/// Every acquisition allocates `len + 1` bytes, fills the first `len` from the
/// source, and leaves a trailing NUL.
///
/// # Errors
/// * `FileAccess` if the source cannot be opened
/// * `ShortRead` if the source yields fewer bytes than were probed
#[derive(Debug, Clone, Default)]
pub struct BufferedCopy<O = FsOpener> {
    opener: O,
}

impl BufferedCopy {
    pub fn new() -> Self {
        Self { opener: FsOpener }
    }
}

impl<O: SourceOpener> BufferedCopy<O> {
    /// Read through a custom opener instead of the filesystem
    pub fn with_opener(opener: O) -> Self {
        Self { opener }
    }
}

impl<O: SourceOpener> ReadStrategy for BufferedCopy<O> {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn acquire(&self, source: &SourceFile) -> Result<Content> {
        let len = source.len_usize()?;

        let mut reader = self
            .opener
            .open(source.path())
            .map_err(|e| BenchError::file_access(source.path(), e))?;

        // One spare byte so the terminator does not reallocate
        let mut buffer = Vec::with_capacity(len + 1);
        buffer.resize(len, 0u8);
        let filled = fill_buffer(&mut reader, &mut buffer);
        if filled < len {
            return Err(BenchError::ShortRead {
                path: source.path().to_path_buf(),
                expected: source.len(),
                actual: filled as u64,
            });
        }

        Ok(Content::from_bytes(buffer))
    }
}

/// Read until `buf` is full, the stream ends, or a read fails
///
/// Returns how many bytes were filled. A failed read ends the fill early and is
/// surfaced by the caller as a short read.
fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::debug!("read failed after {} bytes: {}", filled, e);
                break;
            }
        }
    }
    filled
}
