use std::io::{self, Write};
use std::path::Path;

use crate::config::{config_path, Configuration};

const SEPARATOR: &str = "**************************************************************";

/// Render the violation report for `directory`.
///
/// The embedded JSON is a complete configuration file that accepts every
/// license in `forbidden_licenses`.
pub fn format_violation_report(directory: &Path, forbidden_licenses: &[String]) -> String {
    let suggestion = Configuration::new(forbidden_licenses.iter().cloned());
    let suggestion = match serde_json::to_string_pretty(&suggestion) {
        Ok(json) => json,
        // Serializing a Vec<String> cannot fail
        Err(_) => String::from("{\n  \"allowedLicenses\": []\n}"),
    };

    let mut output = String::new();
    output.push_str(SEPARATOR);
    output.push('\n');
    output.push_str(&format!(
        "Not all licenses used in directory {} are allowed.\n",
        directory.display()
    ));
    if !forbidden_licenses.is_empty() {
        output.push_str(&format!(
            "Forbidden licenses: {}\n",
            forbidden_licenses.join(", ")
        ));
    }
    output.push('\n');
    output.push_str("If you want to allow these licenses, please put the following lines into\n");
    output.push_str(&format!(
        "the allow list file: {}: \n",
        config_path(directory).display()
    ));
    output.push('\n');
    output.push_str(&suggestion);
    output.push_str("\n\n");
    output.push_str(SEPARATOR);
    output.push('\n');
    output
}

/// Print the violation report to stdout as one write.
pub fn show_error_message(directory: &Path, forbidden_licenses: &[String]) {
    let report = format_violation_report(directory, forbidden_licenses);
    let mut stdout = io::stdout().lock();
    // A closed stdout must not turn a report into a crash
    let _ = stdout.write_all(report.as_bytes());
    let _ = stdout.flush();
}
