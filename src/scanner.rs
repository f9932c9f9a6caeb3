use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::ScanFailure;

/// Location of the scanner relative to the tool's installation directory.
pub const DEFAULT_SCANNER_RELATIVE_PATH: &str = "node_modules/.bin/license-checker";

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Produces the raw CSV license listing for a project directory.
pub trait LicenseScanner: Sync {
    fn scan(&self, directory: &Path) -> Result<String, ScanFailure>;
}

/// Runs the `license-checker` executable with `--csv` inside the target directory.
#[derive(Debug, Clone)]
pub struct LicenseCheckerCommand {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl LicenseCheckerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Scanner shipped next to the running executable.
    pub fn installed() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let install_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(install_dir.join(DEFAULT_SCANNER_RELATIVE_PATH)))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, directory: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--csv")
            .current_dir(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn spawn_failure(&self, source: std::io::Error) -> ScanFailure {
        ScanFailure::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl LicenseScanner for LicenseCheckerCommand {
    fn scan(&self, directory: &Path) -> Result<String, ScanFailure> {
        debug!(program = %self.program.display(), directory = %directory.display(), "running license scanner");

        let output = match self.timeout {
            None => self
                .command(directory)
                .output()
                .map_err(|e| self.spawn_failure(e))?,
            Some(timeout) => {
                let child = self
                    .command(directory)
                    .spawn()
                    .map_err(|e| self.spawn_failure(e))?;
                wait_with_timeout(child, timeout)?
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ScanFailure::NonZeroExit {
                status: output.status,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            debug!(stderr = %stderr.trim(), "license scanner wrote to stderr");
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| ScanFailure::NonUtf8Output)?;
        trace!(bytes = stdout.len(), "license scanner finished");
        Ok(stdout)
    }
}

/// Wait for `child`, killing it once `timeout` has elapsed.
///
/// Both pipes are drained on helper threads so a chatty scanner cannot
/// block on a full pipe while we poll. The drains share the same deadline,
/// so a background grandchild holding a pipe open still times out.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<Output, ScanFailure> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let deadline = Instant::now() + timeout;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            // The child may exit between try_wait and kill
            let _ = child.kill();
            child.wait()?;
            return Err(ScanFailure::TimedOut { timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: join_drain(stdout, deadline, timeout)?,
        stderr: join_drain(stderr, deadline, timeout)?,
    })
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_drain(
    handle: Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    deadline: Instant,
    timeout: Duration,
) -> Result<Vec<u8>, ScanFailure> {
    match handle {
        Some(handle) => {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    // The reader thread is detached and ends when the pipe closes
                    return Err(ScanFailure::TimedOut { timeout });
                }
                thread::sleep(POLL_INTERVAL);
            }
            match handle.join() {
                Ok(result) => Ok(result?),
                Err(_) => Err(ScanFailure::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "pipe reader thread panicked",
                ))),
            }
        }
        None => Ok(Vec::new()),
    }
}
