use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use embedrst_config::Config;
use embedrst_engine::{DiagnosticKind, DirectiveAutodetect, SourceRst, io, process_file};
use tracing::{debug, info, warn};

/// Extracts embedded reStructuredText from source code comments.
#[derive(Parser, Debug)]
#[command(name = "embedrst")]
#[command(about = "Extracts embedded reStructuredText from source code comments")]
#[command(version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract RST fragments and write one .rst file per source file
    Extract {
        /// Source files or directories (defaults to the configured source path)
        inputs: Vec<PathBuf>,

        /// Directory the .rst files are written to (default: next to sources)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Report diagnostics without writing anything
    Check {
        /// Source files or directories (defaults to the configured source path)
        inputs: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Extract { inputs, out_dir } => {
            extract(inputs, out_dir.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { inputs } => {
            let malformed = check(inputs)?;
            Ok(if malformed > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

/// Explicit inputs win; otherwise the configured source path is scanned.
fn resolve_inputs(inputs: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let roots = if inputs.is_empty() {
        match Config::load()? {
            Some(config) => vec![config.source_path],
            None => bail!(
                "no inputs given and no config file at {}",
                Config::config_path().display()
            ),
        }
    } else {
        inputs
    };

    let mut files = vec![];
    for root in roots {
        if root.is_dir() {
            files.extend(io::scan_source_files(&root)?);
        } else {
            files.push(root);
        }
    }
    Ok(files)
}

/// Writes one .rst file per source file that contained fragments.
fn extract(inputs: Vec<PathBuf>, out_dir: Option<&Path>) -> Result<usize> {
    let files = resolve_inputs(inputs)?;
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let mut written = 0usize;
    for file in &files {
        let result = process_file(file, &DirectiveAutodetect)?;
        report_diagnostics(&result);

        if result.fragment_count() == 0 {
            debug!(file = %file.display(), "no rst fragments, skipping");
            continue;
        }

        let target = rst_target(file, out_dir)?;
        fs::write(&target, render(&result))
            .with_context(|| format!("writing {}", target.display()))?;
        debug!(target = %target.display(), fragments = result.fragment_count(), "wrote rst file");
        written += 1;
    }

    info!(sources = files.len(), "created {written} rst-files");
    Ok(written)
}

/// Prints every diagnostic; returns the number of malformed blocks.
fn check(inputs: Vec<PathBuf>) -> Result<usize> {
    let files = resolve_inputs(inputs)?;

    let mut malformed = 0usize;
    let mut ambiguous = 0usize;
    for file in &files {
        let result = process_file(file, &DirectiveAutodetect)?;
        for diagnostic in result.all_diagnostics() {
            println!("{diagnostic}");
            match diagnostic.kind {
                DiagnosticKind::MalformedBlock => malformed += 1,
                DiagnosticKind::AmbiguousContainer => ambiguous += 1,
            }
        }
    }

    info!(sources = files.len(), malformed, ambiguous, "check finished");
    Ok(malformed)
}

fn report_diagnostics(result: &SourceRst) {
    for diagnostic in result.all_diagnostics() {
        warn!("{diagnostic}");
    }
}

/// Target path for a source file's extracted fragments: `car.hpp` becomes
/// `car.rst`, either next to the source or under the output directory.
fn rst_target(source: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let target = source.with_extension("rst");
    match out_dir {
        None => Ok(target),
        Some(dir) => {
            let name = target
                .file_name()
                .with_context(|| format!("no file name in {}", source.display()))?;
            Ok(dir.join(name))
        }
    }
}

/// One document per source file: fragments in source order, separated by
/// blank lines.
fn render(result: &SourceRst) -> String {
    let mut out = String::new();
    for block in &result.blocks {
        for fragment in &block.fragments {
            out.push_str(&fragment.body());
            out.push_str("\n\n");
        }
    }
    out
}
