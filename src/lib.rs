//! # readbench - Buffered Read vs Memory-Mapped Access
//!
//! Micro-benchmarks comparing two ways of getting a file's bytes into a program:
//! copying them into an owned buffer, or mapping the file read-only into the
//! address space.
//!
//! ## Features
//!
//! - **Two strategies**: buffered copy with a NUL terminator, and a zero-copy mapped view
//! - **Two regimes**: one large file read once, one small file read thousands of times
//! - **CPU-time reporting**: only the repetition loop is timed, never the size probe
//! - **Scoped resources**: every handle and mapping is released before the next repetition
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`strategy`] - Size probe and the two access strategies
//! - [`accumulator`] - Growable buffer for concatenated results
//! - [`timing`] - Process CPU-time clock
//! - [`config`] - Presets and layered run configuration
//! - [`runner`] - The timed benchmark loop

// Core modules
pub mod error;
pub mod strategy;

// Measurement
pub mod accumulator;
pub mod timing;

// Orchestration
pub mod config;
pub mod runner;

// Re-export commonly used types for convenience
pub use error::{BenchError, Result};

// Public API surface for external usage
pub use config::{OutputMode, RunConfig, Variant};
pub use runner::{run, run_with, RunReport};
pub use strategy::{AccessStrategy, ReadStrategy};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
