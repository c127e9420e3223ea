use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use sanitize_core::Mode;

use crate::config::OutputFormat;

/// Make file names valid on every common filesystem.
///
/// Names are taken from the arguments, or from stdin (one per line) when no
/// arguments are given. Sanitized names are printed in the same order.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Names to sanitize
    #[arg(value_name = "NAME")]
    pub names: Vec<OsString>,

    /// Pipeline to use: "name" (minimal) or "clean" (also tidies separators)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// String substituted for disallowed characters
    #[arg(short, long, value_name = "STR")]
    pub replacement: Option<String>,

    /// Maximum output length in bytes (at most 255)
    #[arg(long, value_name = "BYTES")]
    pub max_length: Option<usize>,

    /// Output format: "plain" or "json"
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Only print names that sanitizing changed
    #[arg(long)]
    pub changed_only: bool,

    /// Configuration file. Defaults to the user config directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write JSON logs to the default log directory
    #[arg(long)]
    pub log: bool,

    /// Also write JSON logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Directory for file logs: `--log-dir`, or the default one with `--log`
    pub fn file_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| self.log.then(sanitize_log::log_dir))
    }
}
