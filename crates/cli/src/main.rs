//! CLI tool for extracting slide text from PowerPoint files.
//!
//! Prints a plain-text report on success and a JSON error record otherwise.
//! Only a missing argument exits non-zero; a file that cannot be read is
//! reported on stdout with exit status 0. Nothing but `--help` and
//! `--version` output comes from clap itself: arguments it cannot parse are
//! taken literally, first one as the file path.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use pptx_reader_core::{render_error_json, render_error_line, render_text_report, ErrorReport, ReadOutcome};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract the text of every slide in a PowerPoint (.pptx) file.
#[derive(Parser, Debug)]
#[command(name = "read-pptx")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    #[arg(allow_hyphen_values = true)]
    file: Option<PathBuf>,

    /// Further arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _rest: Vec<OsString>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Parse the command line. Anything clap rejects is read positionally
    /// instead: the first argument is the file, whatever it looks like.
    fn from_command_line() -> std::result::Result<Self, clap::Error> {
        match Self::try_parse() {
            Ok(args) => Ok(args),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(e)
            }
            Err(_) => Ok(Self::positional(std::env::args_os().skip(1))),
        }
    }

    fn positional(mut args: impl Iterator<Item = OsString>) -> Self {
        Self {
            file: args.next().map(PathBuf::from),
            _rest: args.collect(),
            verbose: false,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = match Args::from_command_line() {
        Ok(args) => args,
        Err(e) => {
            e.print().context("Failed to write to stdout")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    // stdout carries the result; logs stay off unless asked for.
    let default_filter = if args.verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let Some(file_path) = args.file else {
        write_stdout(&render_error_line(&ErrorReport::missing_argument())?)?;
        return Ok(ExitCode::FAILURE);
    };

    log::debug!("Processing: {}", file_path.display());
    let output = match pptx_reader_pptx::read_pptx(&file_path) {
        ReadOutcome::Extracted(content) => {
            log::debug!("Extracted {} slides", content.total_slides);
            render_text_report(&content)
        }
        ReadOutcome::Failed(report) => render_error_json(&report)?,
    };

    write_stdout(&output)?;
    Ok(ExitCode::SUCCESS)
}

/// Write the whole output in one go.
fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write to stdout")
}
