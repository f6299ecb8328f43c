// Declare modules
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod differ;
pub mod error;
pub mod formatter;
pub mod inventory;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use self::cli::{Cli, Command, CreateArgs, DiffArgs, DiffFormat};
use self::config::{load_presets_file, resolve_scan_config};
use self::diagnostics::LogDiagnostics;
use self::formatter::OutputGenerator;
use self::models::DiffSummary;
use self::scanner::Scanner;

/// Parses arguments and runs the requested subcommand.
pub fn run() -> Result<ExitCode> {
    let args = Cli::parse();

    match args.command {
        Command::Create(create) => run_create(create),
        Command::Diff(diff) => run_diff(diff),
    }
}

fn run_create(args: CreateArgs) -> Result<ExitCode> {
    let presets = load_presets_file()?;
    let dir = args.dir.clone();
    let output = args.output.clone();
    let config = resolve_scan_config(args, &presets)?;
    log::debug!("Scan config: {:?}", config);

    let interrupted = install_interrupt_handler()?;
    let scanner = Scanner::new(&dir, &config)?.with_cancel(interrupted);
    let report = scanner
        .scan(&LogDiagnostics)
        .with_context(|| format!("Failed to scan directory {:?}", dir))?;

    if report.files.is_empty() {
        log::warn!("No files matched in {}", report.root.display());
    }

    inventory::write_inventory(&output, &report.files)
        .with_context(|| format!("Failed to write inventory to {:?}", output))?;

    println!("{}", OutputGenerator::create_summary(&output, report.files.len()));
    Ok(ExitCode::SUCCESS)
}

/// The first Ctrl-C sets the returned flag so the scan stops between entries.
/// A second one exits right away, even if the walker is stuck in a read.
fn install_interrupt_handler() -> Result<Arc<AtomicBool>> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let sigint = signal_hook::consts::SIGINT;
    // Runs before the flag is set, so it only fires once the flag is already up.
    signal_hook::flag::register_conditional_shutdown(sigint, 130, Arc::clone(&interrupted))
        .context("Failed to install interrupt handler")?;
    signal_hook::flag::register(sigint, Arc::clone(&interrupted))
        .context("Failed to install interrupt handler")?;
    Ok(interrupted)
}

fn run_diff(args: DiffArgs) -> Result<ExitCode> {
    // Both sides must load before anything is compared.
    let left = inventory::read_lines(&args.left)
        .with_context(|| format!("Error reading {:?}", args.left))?;
    let right = inventory::read_lines(&args.right)
        .with_context(|| format!("Error reading {:?}", args.right))?;

    let rows = differ::diff(&left, &right);
    let summary = DiffSummary::from_rows(&rows);

    let rendered = match args.format {
        DiffFormat::Table => OutputGenerator::diff_table(
            &rows,
            &args.left.display().to_string(),
            &args.right.display().to_string(),
        ),
        DiffFormat::Plain => OutputGenerator::diff_plain(&rows),
        DiffFormat::Json => OutputGenerator::diff_json(&rows)?,
    };
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    log::info!("{}", OutputGenerator::diff_summary(&summary));

    if args.exit_code && !summary.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
