//! Run configuration.
//!
//! A [`RunConfig`] is built from one of the four named [`Variant`] presets, then
//! overridden by an optional TOML file (feature `config`) and finally by
//! command-line flags. Precedence: preset < config file < flags.

use crate::error::{BenchError, Result};
use crate::strategy::AccessStrategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Source file of the large-file presets
pub const LARGE_SOURCE: &str = "measurements.txt";
/// Source file of the small-file presets
pub const SMALL_SOURCE: &str = "small.txt";
/// Where the small-file presets write their accumulated bytes
pub const DEFAULT_OUTPUT: &str = "output.txt";
/// Repetitions of the small-file presets
pub const SMALL_REPETITIONS: usize = 5000;

/// What happens with the acquired content after each repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Concatenate every repetition and write the result to this path
    File(PathBuf),
    /// Keep nothing; report length and last byte of what was read
    Diagnostics,
}

/// Parameters of one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source: PathBuf,
    pub strategy: AccessStrategy,
    pub repetitions: usize,
    pub output: OutputMode,
}

impl RunConfig {
    /// Single repetition reporting diagnostics
    pub fn new(source: impl Into<PathBuf>, strategy: AccessStrategy) -> Self {
        Self {
            source: source.into(),
            strategy,
            repetitions: 1,
            output: OutputMode::Diagnostics,
        }
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputMode::File(path.into());
        self
    }

    pub fn with_diagnostics(mut self) -> Self {
        self.output = OutputMode::Diagnostics;
        self
    }

    /// Check parameters that can be checked without touching the filesystem
    ///
    /// # Errors
    /// * `InvalidArgument` for zero repetitions or an empty source path
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::invalid_argument(
                "repetitions must be at least 1",
            ));
        }
        if self.source.as_os_str().is_empty() {
            return Err(BenchError::invalid_argument("source path is empty"));
        }
        if let OutputMode::File(path) = &self.output {
            if path.as_os_str().is_empty() {
                return Err(BenchError::invalid_argument("output path is empty"));
            }
        }
        Ok(())
    }
}

/// Named benchmark presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Read measurements.txt once into memory
    BigFread,
    /// Map measurements.txt once
    BigMmap,
    /// Read small.txt 5000 times, writing the concatenation to output.txt
    SmallFread,
    /// Map small.txt 5000 times, writing the concatenation to output.txt
    SmallMmap,
}

impl Variant {
    pub fn config(self) -> RunConfig {
        match self {
            Variant::BigFread => RunConfig::new(LARGE_SOURCE, AccessStrategy::Buffered),
            Variant::BigMmap => RunConfig::new(LARGE_SOURCE, AccessStrategy::Mapped),
            Variant::SmallFread => RunConfig::new(SMALL_SOURCE, AccessStrategy::Buffered)
                .with_repetitions(SMALL_REPETITIONS)
                .with_output(DEFAULT_OUTPUT),
            Variant::SmallMmap => RunConfig::new(SMALL_SOURCE, AccessStrategy::Mapped)
                .with_repetitions(SMALL_REPETITIONS)
                .with_output(DEFAULT_OUTPUT),
        }
    }
}

/// Partial configuration from a config file or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub source: Option<PathBuf>,
    pub strategy: Option<AccessStrategy>,
    pub repetitions: Option<usize>,
    pub output: Option<PathBuf>,
    pub diagnostics: Option<bool>,
}

impl ConfigOverrides {
    /// Layer `higher` on top of `self`; fields set in `higher` win
    pub fn merge(self, higher: ConfigOverrides) -> ConfigOverrides {
        // An explicit output in the higher layer cancels a lower diagnostics request
        // and vice versa.
        let (output, diagnostics) = if higher.output.is_some() || higher.diagnostics.is_some() {
            (higher.output, higher.diagnostics)
        } else {
            (self.output, self.diagnostics)
        };

        ConfigOverrides {
            source: higher.source.or(self.source),
            strategy: higher.strategy.or(self.strategy),
            repetitions: higher.repetitions.or(self.repetitions),
            output,
            diagnostics,
        }
    }

    /// Apply on top of a preset, or build from scratch when there is none
    ///
    /// # Errors
    /// * `InvalidArgument` when neither a preset nor a source path is given, or when
    ///   the result fails [`RunConfig::validate`]
    pub fn resolve(self, base: Option<RunConfig>) -> Result<RunConfig> {
        let mut config = match (base, self.source) {
            (Some(mut base), source) => {
                if let Some(source) = source {
                    base.source = source;
                }
                base
            }
            (None, Some(source)) => RunConfig::new(source, AccessStrategy::Buffered),
            (None, None) => {
                return Err(BenchError::invalid_argument(
                    "no source file given; pass a variant or --source",
                ))
            }
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(path) = self.output {
            config.output = OutputMode::File(path);
        } else if self.diagnostics == Some(true) {
            config.output = OutputMode::Diagnostics;
        }

        config.validate()?;
        log::info!(
            "resolved run: {} x{} via {} -> {:?}",
            config.source.display(),
            config.repetitions,
            config.strategy,
            config.output
        );
        Ok(config)
    }

    /// Parse overrides from TOML text
    #[cfg(feature = "config")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BenchError::config(e.to_string()))
    }

    /// Load overrides from a TOML file
    #[cfg(feature = "config")]
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BenchError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| BenchError::config(format!("{}: {}", path.display(), e)))
    }
}

/// `<config_dir>/readbench/config.toml`, if the platform has a config directory
#[cfg(feature = "config")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("readbench").join("config.toml"))
}

/// Load the explicit config file, or the default one when it exists
///
/// An explicitly named file must exist; a missing default file is not an error.
#[cfg(feature = "config")]
pub fn load_overrides(explicit: Option<&Path>) -> Result<ConfigOverrides> {
    match explicit {
        Some(path) => ConfigOverrides::load(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                log::info!("using config file {}", path.display());
                ConfigOverrides::load(&path)
            }
            _ => Ok(ConfigOverrides::default()),
        },
    }
}

#[cfg(not(feature = "config"))]
pub fn load_overrides(explicit: Option<&Path>) -> Result<ConfigOverrides> {
    match explicit {
        Some(path) => Err(BenchError::config(format!(
            "cannot load {}: built without the `config` feature",
            path.display()
        ))),
        None => Ok(ConfigOverrides::default()),
    }
}
