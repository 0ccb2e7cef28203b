//! readbench - Buffered Read vs Memory-Mapped Access
//!
//! Times repeated acquisition of a file's content through one access strategy.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use readbench::config::{load_overrides, ConfigOverrides};
use readbench::{AccessStrategy, RunConfig, Variant};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;

    match readbench::run(&config) {
        Ok(report) => {
            if matches.get_flag("json") {
                println!(
                    "{}",
                    report.to_json().context("Failed to serialize report")?
                );
            } else {
                print!("{}", report);
            }
            Ok(())
        }
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:#}", anyhow::Error::from(err));
            std::process::exit(code);
        }
    }
}

fn cli() -> Command {
    Command::new("readbench")
        .version(readbench::VERSION)
        .about("Compare buffered reads against memory-mapped file access")
        .long_about(
            "readbench times how long it takes to acquire a file's content, either by \
             reading it into a buffer or by mapping it, over one or many repetitions. \
             Only the repetition loop is timed; the elapsed CPU time is printed.",
        )
        .arg(
            Arg::new("variant")
                .help("Named preset: large or small file, read or mapped")
                .value_parser(value_parser!(Variant))
                .index(1),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .value_name("PATH")
                .help("File to read")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .value_name("STRATEGY")
                .help("Access strategy")
                .value_parser(value_parser!(AccessStrategy)),
        )
        .arg(
            Arg::new("repetitions")
                .long("repetitions")
                .short('n')
                .value_name("N")
                .help("How many times the file is acquired")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Write the concatenated content of every repetition here")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with("diagnostics"),
        )
        .arg(
            Arg::new("diagnostics")
                .long("diagnostics")
                .help("Print content length and last byte instead of writing output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as one JSON line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file with run settings (requires the `config` feature)")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Layer preset, config file and flags into the final run configuration
fn resolve_config(matches: &ArgMatches) -> Result<RunConfig> {
    let file_overrides = load_overrides(matches.get_one::<PathBuf>("config").map(|p| p.as_path()))?;
    resolve_with_overrides(matches, file_overrides)
}

/// Layer preset, already loaded file overrides and flags
fn resolve_with_overrides(
    matches: &ArgMatches,
    file_overrides: ConfigOverrides,
) -> Result<RunConfig> {
    let preset = matches.get_one::<Variant>("variant").map(|v| v.config());

    let cli_overrides = ConfigOverrides {
        source: matches.get_one::<PathBuf>("source").cloned(),
        strategy: matches.get_one::<AccessStrategy>("strategy").copied(),
        repetitions: matches.get_one::<usize>("repetitions").copied(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        diagnostics: matches.get_flag("diagnostics").then_some(true),
    };

    let config = file_overrides.merge(cli_overrides).resolve(preset)?;
    Ok(config)
}
