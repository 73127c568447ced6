//! csfold CLI
//!
//! Command-line tool for generating a single-file C# application from a project.

use clap::Parser;
use csfold_core::{generate, load_project, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Process exit codes
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const INVALID_FILE_EXTENSION: u8 = 1;
    pub const FILE_NOT_FOUND: u8 = 2;
    pub const INVALID_FILE_FORMAT: u8 = 3;
    pub const GENERATION_ERROR: u8 = 4;
}

/// Environment variable holding the log filter
const LOG_ENV: &str = "CSFOLD_LOG";

#[derive(Parser)]
#[command(name = "csfold")]
#[command(about = "Generates single-file application from given C# .NET project.", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to C# project (.csproj) file
    project: PathBuf,

    /// Path where single-file application will be generated
    output: PathBuf,

    /// If set, trimming is enabled. Default is disabled
    #[arg(long)]
    enable_trimming: bool,

    /// Log filter (e.g. "debug", "csfold_core=trace"); overrides CSFOLD_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code_for(e.kind()))
        }
    }
}

fn run(cli: &Cli) -> csfold_core::Result<()> {
    let project = load_project(&cli.project)?;
    println!(
        "Loaded project '{}' with {} source files",
        project.metadata.project_name,
        project.source_files.len()
    );
    debug!(sdk = %project.metadata.sdk, packages = project.metadata.packages.len(), "read project metadata");

    let request = project.into_request(&cli.output, cli.enable_trimming);
    let report = generate(&request)?;

    for warning in report.warnings() {
        println!("Warning: {}", warning);
    }
    println!("Created merged C# file: {}", report.output_file.display());
    println!(
        "  {} files merged, {} lines written",
        report.merged_files.len(),
        report.line_count
    );

    Ok(())
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidExtension => exit_codes::INVALID_FILE_EXTENSION,
        ErrorKind::NotFound => exit_codes::FILE_NOT_FOUND,
        ErrorKind::InvalidFormat => exit_codes::INVALID_FILE_FORMAT,
        ErrorKind::Generation => exit_codes::GENERATION_ERROR,
    }
}
