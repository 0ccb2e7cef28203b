//! Untimed size probe for the benchmark source file.

use crate::error::{BenchError, Result};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A source file together with the size discovered before timing starts.
///
/// The size is probed once and never re-validated; strategies trust it for the
/// rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    len: u64,
}

impl SourceFile {
    /// Open `path`, seek to its end to learn the size, and release the handle
    ///
    /// # Errors
    /// * `FileAccess` if the file cannot be opened, is not a regular file, or
    ///   cannot be sized
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| BenchError::file_access(path, e))?;

        let metadata = file
            .metadata()
            .map_err(|e| BenchError::file_access(path, e))?;
        if !metadata.is_file() {
            return Err(BenchError::file_access(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "Not a regular file"),
            ));
        }

        let len = file
            .seek(SeekFrom::End(0))
            .map_err(|e| BenchError::file_access(path, e))?;

        log::debug!("probed {} ({} bytes)", path.display(), len);

        Ok(Self {
            path: path.to_path_buf(),
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Probed size in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Probed size as an in-memory length
    ///
    /// # Errors
    /// * `InvalidArgument` if the file does not fit the address space
    pub(crate) fn len_usize(&self) -> Result<usize> {
        usize::try_from(self.len).map_err(|_| {
            BenchError::invalid_argument(format!(
                "file too large for this platform: {} ({} bytes)",
                self.path.display(),
                self.len
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn create_test_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write test content");
        file.flush().expect("Failed to flush test file");
        file
    }

    #[test]
    fn test_probe_reports_size() {
        let file = create_test_file(b"hello,world!\n");
        let source = SourceFile::probe(file.path()).unwrap();
        assert_eq!(source.len(), 13);
        assert_eq!(source.path(), file.path());
        assert!(!source.is_empty());
    }

    #[test]
    fn test_probe_empty_file() {
        let file = create_test_file(b"");
        let source = SourceFile::probe(file.path()).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_probe_missing_file() {
        let result = SourceFile::probe("/this/file/does/not/exist.txt");
        match result {
            Err(BenchError::FileAccess { path, source }) => {
                assert_eq!(path, PathBuf::from("/this/file/does/not/exist.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected FileAccess, got {:?}", other),
        }
    }

    #[test]
    fn test_probe_directory() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let result = SourceFile::probe(dir.path());
        assert!(matches!(result, Err(BenchError::FileAccess { .. })));
    }
}
