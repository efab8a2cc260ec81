//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup (command-line flag, then environment, then
//! the built-in default) and handed to [`crate::LogicManager`]. Nothing below this layer reads
//! environment variables.

use crate::constants::DEFAULT_DATA_FILE;
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidInput`] if `data_file` is blank or names an existing
    /// directory.
    pub fn new(data_file: PathBuf) -> ClinicResult<Self> {
        validate_data_file(&data_file)?;
        Ok(Self { data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Picks the data file location without reading the environment itself.
///
/// `flag` wins over `env_value`; a blank environment value counts as unset.
pub fn resolve_data_file(
    flag: Option<PathBuf>,
    env_value: Option<String>,
) -> ClinicResult<PathBuf> {
    if let Some(path) = flag {
        validate_data_file(&path)?;
        return Ok(path);
    }

    match env_value {
        Some(value) if !value.trim().is_empty() => Ok(PathBuf::from(value.trim())),
        _ => Ok(PathBuf::from(DEFAULT_DATA_FILE)),
    }
}

fn validate_data_file(path: &Path) -> ClinicResult<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ClinicError::InvalidInput(
            "data file path cannot be empty".into(),
        ));
    }

    if path.is_dir() {
        return Err(ClinicError::InvalidInput(format!(
            "data file path {} is a directory",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_takes_precedence_over_env() {
        let resolved = resolve_data_file(
            Some(PathBuf::from("from-flag.json")),
            Some("from-env.json".into()),
        )
        .unwrap();
        assert_eq!(resolved, PathBuf::from("from-flag.json"));
    }

    #[test]
    fn env_used_when_no_flag() {
        let resolved = resolve_data_file(None, Some(" from-env.json ".into())).unwrap();
        assert_eq!(resolved, PathBuf::from("from-env.json"));
    }

    #[test]
    fn default_used_when_nothing_set() {
        assert_eq!(
            resolve_data_file(None, None).unwrap(),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
        assert_eq!(
            resolve_data_file(None, Some("   ".into())).unwrap(),
            PathBuf::from(DEFAULT_DATA_FILE)
        );
    }

    #[test]
    fn blank_flag_is_rejected() {
        let err = resolve_data_file(Some(PathBuf::from("  ")), None).unwrap_err();
        assert!(matches!(err, ClinicError::InvalidInput(_)));
    }

    #[test]
    fn directory_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(temp_dir.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, ClinicError::InvalidInput(_)));
    }

    #[test]
    fn config_keeps_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("clinic.json");
        let cfg = CoreConfig::new(path.clone()).unwrap();
        assert_eq!(cfg.data_file(), path.as_path());
    }
}
