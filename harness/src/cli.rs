//! `aoc <dayToRun>` entry point shared by solution binaries.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{DEFAULT_CONFIG_PATH, load_config};
use crate::exit_codes;
use crate::input::FsInputReader;
use crate::naming::Identifier;
use crate::pipeline::Pipeline;

const DEFAULT_PROGRAM: &str = "aoc";

#[derive(Debug, Parser)]
#[command(
    name = "aoc",
    version,
    about = "Compile, load and run a numbered puzzle solution"
)]
pub struct Cli {
    /// Day whose solution should run.
    #[arg(value_name = "dayToRun")]
    pub day: Identifier,

    /// Harness config file. Missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Exit with a nonzero code when any stage fails.
    #[arg(long)]
    pub strict: bool,
}

/// Run the process arguments against `catalog` and return the exit code.
pub fn main(catalog: &Catalog) -> i32 {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let code = run_with_args(catalog, std::env::args_os(), &mut out, &mut err);
    if let Err(flush_err) = out.flush() {
        debug!(error = %flush_err, "flush stdout");
    }
    code
}

/// Testable body of [`main`]. `args` includes the program name.
pub fn run_with_args<I, T>(
    catalog: &Catalog,
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = program_name(args.first());

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(parse_err) => return parse_failure(&parse_err, &program, out, err),
    };

    match run(catalog, &cli, out, err) {
        Ok(code) => code,
        Err(run_err) => {
            if let Err(write_err) = writeln!(err, "{run_err:#}") {
                eprintln!("{run_err:#}");
                debug!(error = %write_err, "write run error");
            }
            exit_codes::INVALID
        }
    }
}

fn run(catalog: &Catalog, cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> Result<i32> {
    let config =
        load_config(&cli.config).with_context(|| format!("load {}", cli.config.display()))?;
    let strict = cli.strict || config.strict_exit;
    debug!(day = cli.day.get(), strict, ?config, "starting run");

    let inputs = FsInputReader::new(&config.inputs_dir);
    let pipeline = Pipeline::new(catalog, &config, &inputs);
    let outcome = pipeline.run(cli.day, out, err)?;
    Ok(outcome.exit_code(strict))
}

fn parse_failure(
    parse_err: &clap::Error,
    program: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match parse_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if let Err(write_err) = write!(out, "{}", parse_err.render()) {
                debug!(error = %write_err, "write help");
            }
            exit_codes::OK
        }
        _ => {
            debug!(error = %parse_err, "rejected arguments");
            if let Err(write_err) = writeln!(err, "Usage: {program} <dayToRun>") {
                eprintln!("Usage: {program} <dayToRun>");
                debug!(error = %write_err, "write usage");
            }
            exit_codes::USAGE
        }
    }
}

fn program_name(first: Option<&OsString>) -> String {
    first
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}
