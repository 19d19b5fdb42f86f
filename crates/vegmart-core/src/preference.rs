//! Saved customer location, the local equivalent of the storefront's
//! `customer-location` browser preference.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("customer location must be non-empty")]
    EmptyLocation,

    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default)]
    customer_location: String,
}

/// JSON-file backed store for the customer's selected location.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved location, or `""` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<String, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let file: PreferenceFile =
            serde_json::from_str(&content).map_err(|e| PreferenceError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })?;

        Ok(file.customer_location)
    }

    /// Save `location` (trimmed) as the customer's selection and return it.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::EmptyLocation`] for blank input, or an I/O
    /// error if the file cannot be written.
    pub fn save(&self, location: &str) -> Result<String, PreferenceError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(PreferenceError::EmptyLocation);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = PreferenceFile {
            customer_location: location.to_string(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| PreferenceError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), location, "customer location saved");
        Ok(location.to_string())
    }

    /// Forget the saved location. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), PreferenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
