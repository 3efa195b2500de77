// src/core/config_loader.rs

//! # Config Loader
//!
//! Loads the optional user settings file. A missing file is not an error: every
//! setting has a default, so a fresh install behaves exactly like an empty file.

use crate::{
    core::paths::{self, PathError},
    models::Settings,
};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Could not read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads settings from the default location (or the path named by the override variable).
pub fn load_settings() -> Result<Settings, ConfigError> {
    let path = paths::get_config_path()?;
    load_settings_from(&path)
}

/// Loads settings from `path`, falling back to defaults when the file does not exist.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No settings file at '{}', using defaults.", path.display());
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Loaded settings from '{}' ({} extra rules).",
        path.display(),
        settings.rules.len()
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleInfo;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
history_limit = 5
terminal_width = 40

[[rules]]
name = "OrganizeImports"
description = "Sorts and groups imports."
"#,
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.history_limit, 5);
        assert_eq!(settings.terminal_width, Some(40));
        assert_eq!(
            settings.rules,
            vec![RuleInfo::new("OrganizeImports", "Sorts and groups imports.")]
        );
    }

    #[test]
    fn test_malformed_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_limit = \"many\"").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = load_settings_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
