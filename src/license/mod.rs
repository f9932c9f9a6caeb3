use indexmap::IndexSet;

pub mod parser;

pub use parser::{parse_license_scanner_output, FormatError};

/// Recorded in place of a blank license field.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Distinct license identifiers in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedLicenses(IndexSet<String>);

impl UsedLicenses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the license was already present.
    pub fn insert(&mut self, license: impl Into<String>) -> bool {
        self.0.insert(license.into())
    }

    pub fn contains(&self, license: &str) -> bool {
        self.0.contains(license)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for UsedLicenses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
