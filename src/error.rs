use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

use crate::license::parser::FormatError;

/// Why a single directory could not be checked.
///
/// Every variant is fatal for that directory and fails the whole run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("license scan failed in {}: {reason}", directory.display())]
    Scan {
        directory: PathBuf,
        #[source]
        reason: ScanFailure,
    },

    #[error("unreadable scanner output for {}: {reason}", directory.display())]
    Format {
        directory: PathBuf,
        #[source]
        reason: FormatError,
    },
}

/// Failure modes of the external license scanner.
#[derive(Debug, Error)]
pub enum ScanFailure {
    #[error("could not start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scanner exited with {status}{}", stderr_suffix(stderr))]
    NonZeroExit { status: ExitStatus, stderr: String },

    #[error("scanner did not finish within {}s", timeout.as_secs_f64())]
    TimedOut { timeout: Duration },

    #[error("I/O error while waiting for scanner: {0}")]
    Io(#[from] io::Error),

    #[error("scanner output is not valid UTF-8")]
    NonUtf8Output,
}

impl CheckError {
    pub fn scan(directory: impl Into<PathBuf>, reason: ScanFailure) -> Self {
        CheckError::Scan {
            directory: directory.into(),
            reason,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
