pub mod checker;

// Re-export main types
pub use checker::{extract_forbidden_licenses, ForbiddenLicenses};
