use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Process-wide put-logging configuration.
///
/// Built once at initialization and moved into the logger; read-only
/// afterward. Construction resolves the audit policy path to an absolute
/// path and fails if it cannot be resolved, so a registered hook always
/// carries a usable configuration.
///
/// # Examples
///
/// ```no_run
/// use pvlog::LogConfig;
///
/// let config = LogConfig::new("db/access.acf", 10)?;
/// assert!(config.policy_path().is_absolute());
/// assert_eq!(config.max_array_length(), 10);
/// # Ok::<(), pvlog::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    policy_path: PathBuf,
    max_array_length: usize,
}

impl LogConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `policy_path` cannot be resolved to an
    /// absolute path.
    pub fn new(policy_path: impl AsRef<Path>, max_array_length: usize) -> Result<Self, Error> {
        let supplied = policy_path.as_ref();
        let policy_path = fs::canonicalize(supplied)
            .map_err(|e| Error::config(supplied.to_path_buf(), e))?;
        Ok(Self {
            policy_path,
            max_array_length,
        })
    }

    /// Absolute path of the audit policy file.
    pub fn policy_path(&self) -> &Path {
        &self.policy_path
    }

    /// Maximum number of array elements printed before truncation.
    pub fn max_array_length(&self) -> usize {
        self.max_array_length
    }
}
