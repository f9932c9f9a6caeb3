use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "license-check-node")]
#[command(about = "Fail when a Node project uses a license that is not on its allow-list")]
#[command(version)]
pub struct Cli {
    /// package.json files (or project directories) to check
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// license-checker executable to run instead of the bundled one
    #[arg(long, value_name = "FILE", env = "LICENSE_CHECK_NODE_SCANNER")]
    pub scanner: Option<PathBuf>,

    /// Give up on a scan after this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Enable verbose logging. Repeat for more detail (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err("timeout must be a positive number of seconds".to_string());
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}
