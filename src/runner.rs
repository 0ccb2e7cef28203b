//! Benchmark runner.
//!
//! A run is one straight line: probe the source size (untimed), start the CPU
//! clock, acquire the content `repetitions` times through the configured strategy,
//! stop the clock, then write or report what was collected. Any error ends the run
//! at the repetition where it happened.

use crate::accumulator::ResultAccumulator;
use crate::config::{OutputMode, RunConfig};
use crate::error::Result;
use crate::strategy::{AccessStrategy, Content, ReadStrategy, SourceFile};
use crate::timing::{Stopwatch, TimingSample};
use std::fmt;
use std::path::{Path, PathBuf};

/// Length and final byte of the last acquired content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Bytes before the first NUL, or the whole content when there is none
    pub len: u64,
    /// Final byte of the content, NUL or not
    pub last_byte: Option<u8>,
}

/// What the run produced besides its timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Accumulated bytes were written to `path`
    Written { path: PathBuf, bytes: u64 },
    /// Nothing was kept; these were observed on the content
    Inspected(Diagnostics),
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub source: PathBuf,
    pub file_size: u64,
    pub strategy: AccessStrategy,
    pub repetitions: usize,
    pub timing: TimingSample,
    pub outcome: Outcome,
}

impl RunReport {
    /// One-line JSON rendering for scripts
    pub fn to_json(&self) -> serde_json::Result<String> {
        let outcome = match &self.outcome {
            Outcome::Written { path, bytes } => serde_json::json!({
                "written": { "path": path, "bytes": bytes }
            }),
            Outcome::Inspected(diag) => serde_json::json!({
                "inspected": { "len": diag.len, "last_byte": diag.last_byte }
            }),
        };

        serde_json::to_string(&serde_json::json!({
            "source": self.source,
            "file_size": self.file_size,
            "strategy": self.strategy,
            "repetitions": self.repetitions,
            "cpu_seconds": self.timing.elapsed_secs(),
            "wall_seconds": self.timing.wall_secs(),
            "outcome": outcome,
        }))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Outcome::Inspected(diag) = &self.outcome {
            writeln!(f, "Len {}", diag.len)?;
            if self.strategy == AccessStrategy::Mapped {
                if let Some(byte) = diag.last_byte {
                    if byte.is_ascii_graphic() || byte == b' ' {
                        writeln!(f, "Last Character {}", byte as char)?;
                    } else {
                        writeln!(f, "Last Character {}", std::ascii::escape_default(byte))?;
                    }
                }
            }
        }
        writeln!(f, "Execution time: {:.6} seconds", self.timing.elapsed_secs())
    }
}

/// Where each repetition's content goes
enum Sink<'a> {
    Accumulate {
        accumulator: ResultAccumulator,
        path: &'a Path,
    },
    Inspect(Diagnostics),
}

impl Sink<'_> {
    #[inline]
    fn consume(&mut self, content: &Content) {
        match self {
            Sink::Accumulate { accumulator, .. } => accumulator.append(content.as_bytes()),
            Sink::Inspect(diag) => {
                // Scanning touches every page of a mapped view.
                diag.len = memchr::memchr(0, content).unwrap_or(content.len()) as u64;
                diag.last_byte = content.last().copied();
            }
        }
    }
}

/// Run the benchmark with the strategy named in `config`
///
/// # Errors
/// * `InvalidArgument` for an invalid configuration
/// * `FileAccess` if the source cannot be probed; raised before timing starts
/// * Any error of the strategy; the remaining repetitions are skipped
/// * `OutputWrite` if the accumulated bytes cannot be written
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let strategy = config.strategy.reader();
    run_with(config, strategy.as_ref())
}

/// Run the benchmark through an explicit strategy implementation
///
/// `config.strategy` is only used for reporting.
pub fn run_with<S: ReadStrategy + ?Sized>(config: &RunConfig, strategy: &S) -> Result<RunReport> {
    config.validate()?;

    let source = SourceFile::probe(&config.source)?;

    let mut sink = match &config.output {
        OutputMode::File(path) => Sink::Accumulate {
            accumulator: ResultAccumulator::with_capacity_hint(source.len(), config.repetitions),
            path,
        },
        OutputMode::Diagnostics => Sink::Inspect(Diagnostics::default()),
    };

    log::debug!(
        "timing {} repetitions of {} over {}",
        config.repetitions,
        strategy.name(),
        source.path().display()
    );

    let stopwatch = Stopwatch::start();
    for _ in 0..config.repetitions {
        let content = strategy.acquire(&source)?;
        sink.consume(&content);
    }
    let timing = stopwatch.stop();

    log::debug!(
        "timed region done: cpu {:?}, wall {:?}",
        timing.cpu_elapsed(),
        timing.wall
    );

    let outcome = match sink {
        Sink::Accumulate { accumulator, path } => {
            accumulator.write_to(path)?;
            log::debug!("wrote {} bytes to {}", accumulator.len(), path.display());
            Outcome::Written {
                path: path.to_path_buf(),
                bytes: accumulator.len() as u64,
            }
        }
        Sink::Inspect(diag) => Outcome::Inspected(diag),
    };

    Ok(RunReport {
        source: config.source.clone(),
        file_size: source.len(),
        strategy: config.strategy,
        repetitions: config.repetitions,
        timing,
        outcome,
    })
}
