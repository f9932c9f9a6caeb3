pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod license;
pub mod logging;
pub mod output;
pub mod policy;
pub mod scanner;

// Re-export main types for easy access
pub use commands::{run, CheckOutcome};
pub use config::{load_configuration, Configuration, CONFIG_FILE_NAME};
pub use error::{CheckError, ScanFailure};
pub use license::{parse_license_scanner_output, UsedLicenses};
pub use policy::extract_forbidden_licenses;
pub use scanner::{LicenseCheckerCommand, LicenseScanner};
