//! File access strategies under comparison.
//!
//! This module provides the two ways the benchmark acquires file content: a buffered
//! copy into process-owned memory and a read-only memory-mapped view. Both hand back
//! a [`Content`] of exactly the probed file size.

pub mod buffered;
pub mod mapped;
pub mod probe;

pub use buffered::{BufferedCopy, FsOpener, SourceOpener};
pub use mapped::MappedView;
pub use probe::SourceFile;

use crate::error::Result;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Core trait for acquiring a file's content once.
///
/// Every call opens its own handle and everything it acquires is released when the
/// returned [`Content`] is dropped. Nothing is cached between calls.
pub trait ReadStrategy {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Acquire the full content of `source`
    ///
    /// # Returns
    /// * Content holding exactly `source.len()` bytes
    ///
    /// # Errors
    /// * Strategy specific: see [`BufferedCopy`] and [`MappedView`]
    fn acquire(&self, source: &SourceFile) -> Result<Content>;
}

/// Content produced by one acquisition.
#[derive(Debug)]
pub enum Content {
    /// Owned copy; the buffer carries one trailing NUL after the file bytes
    Buffered(Vec<u8>),
    /// Read-only view over the page cache
    Mapped(Mmap),
}

impl Content {
    /// Wrap file bytes as a buffered copy, appending the NUL terminator
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        bytes.push(0);
        Content::Buffered(bytes)
    }

    /// File bytes, without any terminator
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Buffered(buffer) => &buffer[..buffer.len().saturating_sub(1)],
            Content::Mapped(mmap) => &mmap[..],
        }
    }

    /// Raw buffer including the NUL terminator, for buffered copies only
    pub fn terminated(&self) -> Option<&[u8]> {
        match self {
            Content::Buffered(buffer) => Some(buffer.as_slice()),
            Content::Mapped(_) => None,
        }
    }
}

impl Deref for Content {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Selectable access strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessStrategy {
    /// Read the whole file into a freshly allocated buffer
    #[value(alias = "fread")]
    #[serde(alias = "fread")]
    Buffered,
    /// Map the file read-only into the address space
    #[value(alias = "mmap")]
    #[serde(alias = "mmap")]
    Mapped,
}

impl AccessStrategy {
    /// Build the strategy implementation for this variant
    pub fn reader(self) -> Box<dyn ReadStrategy> {
        match self {
            AccessStrategy::Buffered => Box::new(BufferedCopy::new()),
            AccessStrategy::Mapped => Box::new(MappedView::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessStrategy::Buffered => "buffered",
            AccessStrategy::Mapped => "mapped",
        }
    }
}

impl fmt::Display for AccessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_content_hides_terminator() {
        let content = Content::from_bytes(b"abc".to_vec());
        assert_eq!(content.as_bytes(), b"abc");
        assert_eq!(content.terminated(), Some(&b"abc\0"[..]));
        assert_eq!(content.len(), 3);
        assert!(matches!(content, Content::Buffered(_)));
    }

    #[test]
    fn test_empty_buffered_content() {
        let content = Content::from_bytes(Vec::new());
        assert!(content.as_bytes().is_empty());
        assert_eq!(content.terminated(), Some(&[0u8][..]));
    }

    #[test]
    fn test_strategy_names_and_aliases() {
        use clap::ValueEnum;

        for (name, expected) in [
            ("buffered", AccessStrategy::Buffered),
            ("fread", AccessStrategy::Buffered),
            ("mapped", AccessStrategy::Mapped),
            ("mmap", AccessStrategy::Mapped),
        ] {
            assert_eq!(AccessStrategy::from_str(name, false).unwrap(), expected);
            let json = format!("\"{}\"", name);
            assert_eq!(
                serde_json::from_str::<AccessStrategy>(&json).unwrap(),
                expected
            );
        }

        assert!(AccessStrategy::from_str("stream", false).is_err());
        assert!(serde_json::from_str::<AccessStrategy>("\"stream\"").is_err());
    }

    #[test]
    fn test_reader_names() {
        assert_eq!(AccessStrategy::Buffered.reader().name(), "buffered");
        assert_eq!(AccessStrategy::Mapped.reader().name(), "mapped");
        assert_eq!(AccessStrategy::Mapped.to_string(), "mapped");
    }
}
