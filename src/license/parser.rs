use thiserror::Error;
use tracing::{trace, warn};

use super::{UsedLicenses, UNKNOWN_LICENSE};

const LICENSE_COLUMN: &str = "license";
const PACKAGE_COLUMN: &str = "module name";

/// Why scanner output could not be turned into a license set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormatError(pub String);

/// Collect the distinct values of the `license` column.
///
/// Blank or missing license fields are recorded as [`UNKNOWN_LICENSE`]
/// so they still have to be allowed explicitly.
pub fn parse_license_scanner_output(output: &str) -> Result<UsedLicenses, FormatError> {
    let mut licenses = UsedLicenses::new();

    // An empty listing means no dependencies at all
    if output.trim().is_empty() {
        return Ok(licenses);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(output.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FormatError(format!("invalid CSV header: {}", e)))?
        .clone();
    let license_index = headers
        .iter()
        .position(|h| h == LICENSE_COLUMN)
        .ok_or_else(|| {
            FormatError(format!(
                "missing '{}' column (found: {})",
                LICENSE_COLUMN,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })?;
    let package_index = headers.iter().position(|h| h == PACKAGE_COLUMN);

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| FormatError(format!("invalid CSV row {}: {}", row + 1, e)))?;

        let license = match record.get(license_index) {
            Some(license) if !license.is_empty() => license,
            _ => {
                let package = package_index
                    .and_then(|i| record.get(i))
                    .unwrap_or("(unnamed package)");
                warn!(package, "no license reported, recording as {}", UNKNOWN_LICENSE);
                UNKNOWN_LICENSE
            }
        };

        if licenses.insert(license) {
            trace!(license, "found license");
        }
    }

    Ok(licenses)
}
