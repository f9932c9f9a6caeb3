use crate::config::Configuration;
use crate::license::UsedLicenses;

/// Licenses in use that the allow-list does not name, in scan order.
pub type ForbiddenLicenses = Vec<String>;

/// Set difference `used \ allowed`, compared by exact string equality.
pub fn extract_forbidden_licenses(
    configuration: &Configuration,
    used_licenses: &UsedLicenses,
) -> ForbiddenLicenses {
    used_licenses
        .iter()
        .filter(|license| !configuration.allows(license))
        .map(str::to_string)
        .collect()
}
