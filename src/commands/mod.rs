pub mod check;

pub use check::{check_all, check_directory, check_licenses, run, run_cli, CheckOptions, CheckOutcome};
