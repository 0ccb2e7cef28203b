//! Growable buffer collecting every repetition's content.

use crate::error::{BenchError, Result};
use std::path::Path;

/// Concatenation of the bytes acquired across repetitions.
///
/// Backed by a `Vec<u8>`, so capacity always covers what has been appended.
/// The up-front reservation is a hint; growth past it is amortized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultAccumulator {
    buffer: Vec<u8>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `repetitions` copies of a `per_repetition`-byte file
    ///
    /// Falls back to an empty buffer when the product overflows or the
    /// allocation is refused; appends then grow the buffer as usual.
    pub fn with_capacity_hint(per_repetition: u64, repetitions: usize) -> Self {
        let mut buffer = Vec::new();
        let wanted = usize::try_from(per_repetition)
            .ok()
            .and_then(|len| len.checked_mul(repetitions));

        match wanted {
            Some(bytes) => {
                if let Err(e) = buffer.try_reserve_exact(bytes) {
                    log::debug!("accumulator reservation of {} bytes refused: {}", bytes, e);
                }
            }
            None => log::debug!("accumulator size hint overflows, growing on demand"),
        }

        Self { buffer }
    }

    /// Append one repetition's bytes
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Write the appended bytes to `path`, creating or truncating it
    ///
    /// # Errors
    /// * `OutputWrite` if the file cannot be created or written
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.buffer).map_err(|e| BenchError::output_write(path, e))
    }
}
