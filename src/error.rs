//! Error types and handling infrastructure for readbench.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error type. The binary layers `anyhow` on top for its own plumbing.
//!
//! ## Design Principles
//!
//! - **Fatal by default**: A benchmark run never retries; every error ends the run
//! - **Context preservation**: Errors carry the path they were raised for
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for readbench operations.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Source file could not be opened or sized
    #[error("Error opening file for reading: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A buffered read returned fewer bytes than the probed file size
    #[error("Failed to read file: {path} (expected {expected} bytes, got {actual})")]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Opening the file for mapping, or creating the mapping, failed
    #[error("Error mmapping the file: {path}")]
    MapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Accumulated output could not be written
    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid run parameters
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Standard Result type for readbench operations.
pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Create a FileAccess error for `path`
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a MapFailed error for `path`
    pub fn map_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MapFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an OutputWrite error for `path`
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a Config error with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Every benchmark failure is fatal and exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
