use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use electrodes::extract::expected_count_from_name;
use electrodes::label::label;
use electrodes::{check_mapping, fill_missing, io as eio, Config, Extractor, IssueSet, Outcome};
use geometry::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
/// Exit code when a required input file is absent.
const EXIT_INPUT_ABSENT: u8 = 2;
/// Exit code for a soft pass under `--strict`.
const EXIT_SOFT_STRICT: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(error_exit_code(&err))
        }
    }
}

/// The exit code of a `check` run with the given outcome.
fn outcome_exit_code(outcome: Outcome, strict: bool) -> u8 {
    match outcome {
        Outcome::Clean => EXIT_SUCCESS,
        Outcome::Soft if strict => EXIT_SOFT_STRICT,
        Outcome::Soft => EXIT_SUCCESS,
        Outcome::Hard => EXIT_FAILURE,
    }
}

/// The exit code of a failed run.
///
/// An absent input anywhere in the error chain takes precedence.
fn error_exit_code(err: &anyhow::Error) -> u8 {
    let absent = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<electrodes::Error>())
        .any(electrodes::Error::is_input_absent);
    if absent {
        EXIT_INPUT_ABSENT
    } else {
        EXIT_FAILURE
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Extract, normalize and validate MEA electrode layouts.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
    /// Increase logging verbosity. Overridden by `RUST_LOG`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a normalized electrode layout from polygon records.
    Extract(ExtractArgs),
    /// Infer a rectangular grid from a position list and fill its gaps.
    Fill(FillArgs),
    /// Check an old/new numbering pair against a reference mapping table.
    Check(CheckArgs),
}

/// Arguments to [`extract`].
#[derive(ClapArgs)]
pub struct ExtractArgs {
    /// The path to a JSON list of polygon records.
    polygons: PathBuf,
    /// The layout name used to derive the expected electrode count.
    ///
    /// Defaults to the file stem of the input, e.g. `MEA128_rec` expects 128 electrodes.
    #[arg(short, long)]
    name: Option<String>,
    /// A TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The path where the JSON layout should be saved.
    ///
    /// The file and its parent directories will be created if necessary.
    /// If unspecified, the layout is written to stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Arguments to [`fill`].
#[derive(ClapArgs)]
pub struct FillArgs {
    /// The path to a YAML document with a `pos` list.
    positions: PathBuf,
    /// The grid pitch along x. Requires `--pitch-y`.
    #[arg(long, requires = "pitch_y")]
    pitch_x: Option<f64>,
    /// The grid pitch along y. Requires `--pitch-x`.
    #[arg(long, requires = "pitch_x")]
    pitch_y: Option<f64>,
    /// A TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The path where the JSON list of labeled positions should be saved.
    ///
    /// If unspecified, the list is written to stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// Arguments to [`check`].
#[derive(ClapArgs)]
pub struct CheckArgs {
    /// A YAML or JSON document with `old` and `new` numbering grids.
    numbering: PathBuf,
    /// A CSV mapping table with `old` and `new` columns.
    table: PathBuf,
    /// The directory where CSV reports are written.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Exit with a non-zero code when the check passes with warnings.
    #[arg(long)]
    strict: bool,
}

fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Extract(args) => extract(args).map(|_| ExitCode::SUCCESS),
        Command::Fill(args) => fill(args).map(|_| ExitCode::SUCCESS),
        Command::Check(args) => check(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}.", path)),
        None => Ok(Config::default()),
    }
}

fn report_issues(issues: &IssueSet) {
    for item in issues.iter() {
        eprintln!("{item}");
        if let Some(help) = item.help() {
            eprintln!("  help: {help}");
        }
    }
}

fn emit<T: Serialize + ?Sized>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    if let Some(path) = out {
        eio::write_json(path, value).with_context(|| format!("Failed to write {:?}.", path))?;
        eprintln!("output: {:?}", path);
    } else {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value)
            .with_context(|| "Failed to write to stdout.")?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Runs the extraction pipeline on a polygon record file.
pub fn extract(args: ExtractArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let name = args.name.clone().unwrap_or_else(|| {
        args.polygons
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let expected = expected_count_from_name(&name);
    if expected.is_none() {
        tracing::warn!(name = %name, "could not derive an expected electrode count");
    }
    eprintln!("input file: {:?}", &args.polygons);
    eprintln!("expected electrodes: {:?}", expected);

    let polygons = eio::read_polygons(&args.polygons)
        .with_context(|| format!("Failed to read polygon records from {:?}.", args.polygons))?;
    let extraction = Extractor::new(&config)
        .expected_count(expected)
        .extract(&polygons)
        .with_context(|| "Failed to extract electrodes.")?;
    report_issues(&extraction.issues);

    emit(args.out.as_deref(), &extraction.layout)?;
    eprintln!(
        "Extracted {} electrodes and {} stimulus pads.",
        extraction.electrodes.len(),
        extraction.stimulus.len()
    );
    Ok(())
}

/// Fills the gaps of a sparse rectangular position list.
pub fn fill(args: FillArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let known = eio::read_point_list(&args.positions)
        .with_context(|| format!("Failed to read positions from {:?}.", args.positions))?;
    let pitch = args.pitch_x.zip(args.pitch_y).map(|(x, y)| Dims::new(x, y));

    let mut issues = IssueSet::new();
    let grid = fill_missing(&known, pitch, &config.grid, &mut issues)
        .with_context(|| "Failed to fill grid.")?;
    report_issues(&issues);

    emit(args.out.as_deref(), &label(grid.points.iter().copied()))?;
    eprintln!(
        "Filled {} positions ({} observed, {} added).",
        grid.points.len(),
        grid.observed,
        grid.added()
    );
    Ok(())
}

/// Checks a numbering pair against a mapping table.
pub fn check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    eio::require(&args.numbering).with_context(|| "Missing numbering grids.")?;
    eio::require(&args.table).with_context(|| "Missing mapping table.")?;
    let numbering = eio::read_numbering(&args.numbering)
        .with_context(|| format!("Failed to read numbering from {:?}.", args.numbering))?;
    let table = eio::read_mapping_table(&args.table)
        .with_context(|| format!("Failed to read mapping table from {:?}.", args.table))?;

    let report = check_mapping(&numbering.old, &numbering.new, &table);
    println!("{report}");

    if let Some(dir) = &args.out_dir {
        let written = eio::write_report(dir, &report)
            .with_context(|| format!("Failed to write reports to {:?}.", dir))?;
        for path in written {
            println!("Saved {:?}", path);
        }
    }

    let outcome = report.outcome();
    if outcome == Outcome::Hard {
        eprintln!("ERROR: found mismatches between the numbering and the mapping table.");
    }
    Ok(ExitCode::from(outcome_exit_code(outcome, args.strict)))
}
