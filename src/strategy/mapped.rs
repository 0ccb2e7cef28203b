//! Memory-mapped view strategy
//!
//! This module provides the MappedView implementation that maps exactly the probed
//! number of bytes read-only and shared, starting at offset 0. No bytes are copied;
//! pages are faulted in by the OS as the view is touched.

use crate::error::{BenchError, Result};
use crate::strategy::{Content, ReadStrategy, SourceFile};
use memmap2::MmapOptions;
use std::fs::File;

/// Read-only mapping strategy
///
/// The descriptor is closed as soon as the mapping exists; the mapping itself lives
/// until the returned [`Content`] is dropped.
///
/// # Errors
/// * `MapFailed` if the file cannot be opened or mapped, including zero-length files
#[derive(Debug, Clone)]
pub struct MappedView {
    /// Ask the kernel for sequential read-ahead on the fresh mapping
    advise_sequential: bool,
}

impl MappedView {
    pub fn new() -> Self {
        Self {
            advise_sequential: true,
        }
    }

    /// Skip the access-pattern hint and map with kernel defaults
    pub fn without_advice() -> Self {
        Self {
            advise_sequential: false,
        }
    }
}

impl Default for MappedView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadStrategy for MappedView {
    fn name(&self) -> &'static str {
        "mapped"
    }

    fn acquire(&self, source: &SourceFile) -> Result<Content> {
        let path = source.path();

        if source.is_empty() {
            return Err(BenchError::map_failed(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "cannot map a zero-length file",
                ),
            ));
        }
        let len = source.len_usize()?;

        let file = File::open(path).map_err(|e| BenchError::map_failed(path, e))?;

        // The file is only read through the mapping, and the benchmark does not
        // modify sources while they are mapped.
        let mmap = unsafe {
            MmapOptions::new()
                .len(len)
                .map(&file)
                .map_err(|e| BenchError::map_failed(path, e))?
        };

        #[cfg(unix)]
        {
            if self.advise_sequential {
                if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                    // Non-fatal
                    log::warn!("Failed to set mmap advice: {}", e);
                }
            }
        }

        drop(file);
        Ok(Content::Mapped(mmap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_acquire_maps_whole_file() {
        let file = create_test_file(b"first\nsecond\nthird\n");
        let source = SourceFile::probe(file.path()).unwrap();

        let content = MappedView::new().acquire(&source).unwrap();
        assert!(matches!(content, Content::Mapped(_)));
        assert_eq!(content.as_bytes(), b"first\nsecond\nthird\n");
        assert_eq!(content.last(), Some(&b'\n'));
        assert!(content.terminated().is_none());
    }

    #[test]
    fn test_view_is_limited_to_probed_size() {
        let mut file = create_test_file(b"0123456789");
        let source = SourceFile::probe(file.path()).unwrap();

        file.write_all(b"appended later").unwrap();
        file.flush().unwrap();

        let content = MappedView::without_advice().acquire(&source).unwrap();
        assert_eq!(content.as_bytes(), b"0123456789");
    }

    #[test]
    fn test_zero_length_file_is_rejected() {
        let file = create_test_file(b"");
        let source = SourceFile::probe(file.path()).unwrap();

        let result = MappedView::new().acquire(&source);
        assert!(matches!(result, Err(BenchError::MapFailed { .. })));
    }

    #[test]
    fn test_missing_file_is_map_failure() {
        let file = create_test_file(b"temporary");
        let source = SourceFile::probe(file.path()).unwrap();
        drop(file);

        let result = MappedView::new().acquire(&source);
        assert!(matches!(result, Err(BenchError::MapFailed { .. })));
    }

    #[test]
    fn test_repeated_acquisitions_are_independent() {
        let file = create_test_file(b"abc");
        let source = SourceFile::probe(file.path()).unwrap();
        let strategy = MappedView::new();

        for _ in 0..10 {
            let content = strategy.acquire(&source).unwrap();
            assert_eq!(&content[..], b"abc");
        }
    }
}
