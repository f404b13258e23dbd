use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod emit;
pub mod scan;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a file of frame records and report on each session.
    Scan(ScanArgs),
    /// Emit a synthetic well-formed housekeeping stream.
    Emit(EmitArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Scan(args) => scan::run(args, format),
        Command::Emit(args) => emit::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// File of newline-delimited JSON frame records.
    pub file: PathBuf,
    /// Tolerance between a data frame's timestamp and its earliest block
    /// sample time, in time units.
    #[arg(long)]
    pub tolerance: Option<f64>,
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Write the stream to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Number of providers to register.
    #[arg(long, default_value_t = 1)]
    pub providers: u32,
    /// Number of data frames to emit, round-robin across providers.
    #[arg(long, default_value_t = 10)]
    pub frames: u32,
    /// Time between consecutive data frames.
    #[arg(long, default_value_t = 10.0)]
    pub interval: f64,
    /// Samples per data frame block.
    #[arg(long, default_value_t = 8)]
    pub samples: usize,
    /// Session start timestamp. Defaults to now.
    #[arg(long)]
    pub start_time: Option<f64>,
    /// Explicit session id. Derived when omitted.
    #[arg(long)]
    pub session_id: Option<i64>,
    /// Session description.
    #[arg(long, default_value = "hkstream synthetic stream")]
    pub description: String,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {}
