//! Logger setup for the CLI.
//!
//! Info messages print bare, warnings and errors get a coloured prefix.
//! `--verbose` adds timestamps, levels and targets and enables debug output.
//! `--logfile` sends everything to a file with colour codes stripped.
//! `RUST_LOG` overrides the level chosen from the flags.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .format(move |buf, record| format_record(buf, record, verbose));

    if let Some(path) = logfile {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(
            strip_ansi_escapes::Writer::new(file),
        )));
    }

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("Failed to initialise logging: {}", e)))
}

fn format_record(buf: &mut Formatter, record: &Record, verbose: bool) -> io::Result<()> {
    if verbose {
        let ts = buf.timestamp_seconds();
        write!(buf, "{} {:<5} {}: ", ts, record.level(), record.target())?;
    }
    match record.level() {
        Level::Error => write!(buf, "{} ", "error:".if_supports_color(Stderr, |t| t.red()))?,
        Level::Warn => write!(
            buf,
            "{} ",
            "warning:".if_supports_color(Stderr, |t| t.yellow())
        )?,
        _ => {}
    }
    writeln!(buf, "{}", record.args())
}
