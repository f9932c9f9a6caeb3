use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CheckError;

/// Name of the per-project allow-list file.
pub const CONFIG_FILE_NAME: &str = ".license-check-node.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// License identifiers the project may depend on
    pub allowed_licenses: Vec<String>,
}

impl Configuration {
    pub fn new<I, S>(allowed_licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_licenses: allowed_licenses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, license: &str) -> bool {
        self.allowed_licenses.iter().any(|allowed| allowed == license)
    }
}

/// Location of the allow-list file for a project directory.
pub fn config_path(directory: &Path) -> PathBuf {
    directory.join(CONFIG_FILE_NAME)
}

/// Load the allow-list for `directory`.
///
/// A missing file is not an error: it yields an empty allow-list, so nothing
/// is allowed until the project opts in.
pub fn load_configuration(directory: &Path) -> Result<Configuration, CheckError> {
    let path = config_path(directory);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no configuration file, allowing nothing");
            return Ok(Configuration::default());
        }
        Err(source) => return Err(CheckError::ConfigRead { path, source }),
    };

    let configuration: Configuration = serde_json::from_str(&content)
        .map_err(|source| CheckError::ConfigParse { path: path.clone(), source })?;

    debug!(
        path = %path.display(),
        allowed = configuration.allowed_licenses.len(),
        "loaded configuration"
    );
    Ok(configuration)
}
