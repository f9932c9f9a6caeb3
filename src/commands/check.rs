use anyhow::{Context, Result};
use clap::Parser;
use indexmap::IndexSet;
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::load_configuration;
use crate::error::CheckError;
use crate::license::parse_license_scanner_output;
use crate::output::show_error_message;
use crate::policy::{extract_forbidden_licenses, ForbiddenLicenses};
use crate::scanner::{LicenseCheckerCommand, LicenseScanner};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Suppress progress lines
    pub quiet: bool,
}

/// Result of a check that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Violations(ForbiddenLicenses),
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }
}

/// Directory whose dependencies a command-line path refers to.
///
/// Manifest files map to their parent; a bare file name maps to `.`.
/// An existing directory is taken as is. `.` components are dropped so
/// different spellings of one directory compare equal.
pub fn project_directory(path: &Path) -> PathBuf {
    let directory = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or_else(|| Path::new(""))
    };
    normalize(directory)
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Project directories for `paths`, first occurrence wins.
pub fn unique_directories(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|path| project_directory(path))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Load configuration, scan, parse and evaluate one directory.
pub fn check_directory<S: LicenseScanner + ?Sized>(
    directory: &Path,
    scanner: &S,
) -> Result<CheckOutcome, CheckError> {
    let configuration = load_configuration(directory)?;

    let output = scanner
        .scan(directory)
        .map_err(|reason| CheckError::scan(directory, reason))?;

    let used_licenses =
        parse_license_scanner_output(&output).map_err(|reason| CheckError::Format {
            directory: directory.to_path_buf(),
            reason,
        })?;
    debug!(
        directory = %directory.display(),
        licenses = used_licenses.len(),
        "parsed scanner output"
    );

    let forbidden_licenses = extract_forbidden_licenses(&configuration, &used_licenses);
    if forbidden_licenses.is_empty() {
        Ok(CheckOutcome::Passed)
    } else {
        Ok(CheckOutcome::Violations(forbidden_licenses))
    }
}

/// Check one directory and tell the operator about it. Returns pass/fail.
pub fn check_licenses<S: LicenseScanner + ?Sized>(
    directory: &Path,
    scanner: &S,
    options: &CheckOptions,
) -> bool {
    if !options.quiet {
        println!("Scanning licenses for {}", directory.display());
    }

    match check_directory(directory, scanner) {
        Ok(CheckOutcome::Passed) => {
            info!(directory = %directory.display(), "all licenses allowed");
            true
        }
        Ok(CheckOutcome::Violations(forbidden_licenses)) => {
            show_error_message(directory, &forbidden_licenses);
            false
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

/// Check every directory in parallel. `true` only if all of them pass.
pub fn check_all<S: LicenseScanner + ?Sized>(
    directories: &[PathBuf],
    scanner: &S,
    options: &CheckOptions,
) -> bool {
    // Collect before folding so every directory gets checked and reported
    let results: Vec<bool> = directories
        .par_iter()
        .map(|directory| check_licenses(directory, scanner, options))
        .collect();

    results.into_iter().all(|passed| passed)
}

fn resolve_scanner(cli: &Cli) -> Result<LicenseCheckerCommand> {
    let scanner = match &cli.scanner {
        Some(program) => LicenseCheckerCommand::new(program),
        None => LicenseCheckerCommand::installed()
            .context("Failed to locate the installation directory for license-checker")?,
    };
    Ok(scanner.with_timeout(cli.timeout))
}

/// Run a parsed command line and return the process exit status.
pub fn run_cli(cli: &Cli) -> i32 {
    let scanner = match resolve_scanner(cli) {
        Ok(scanner) => scanner,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_FAILURE;
        }
    };
    debug!(scanner = %scanner.program().display(), "using license scanner");

    let directories = unique_directories(&cli.paths);
    let options = CheckOptions { quiet: cli.quiet };

    if check_all(&directories, &scanner, &options) {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Entry point taking the full argument list, program name included.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run_cli(&cli),
        Err(e) => {
            let _ = e.print();
            e.exit_code()
        }
    }
}
