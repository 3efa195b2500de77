// src/core/paths.rs

use crate::constants::{CONFIG_FILENAME, CONFIG_PATH_ENV, TOOL_NAME};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
}

/// Returns the path to the fixline configuration directory (`~/.config/fixline`).
///
/// The directory is never created: the tool only reads from it.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    dirs::config_dir()
        .map(|dir| dir.join(TOOL_NAME))
        .ok_or(PathError::ConfigDirNotFound)
}

/// Returns the configuration file to read, honoring the `FIXLINE_CONFIG` override.
pub fn get_config_path() -> Result<PathBuf, PathError> {
    if let Ok(custom) = env::var(CONFIG_PATH_ENV)
        && !custom.trim().is_empty()
    {
        return Ok(PathBuf::from(expand_user_path(custom.trim()).into_owned()));
    }
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a typed path.
///
/// Unknown variables leave the text untouched: a half-typed `$HO` must still be
/// completable as a literal path.
pub fn expand_user_path(text: &str) -> Cow<'_, str> {
    match shellexpand::full(text) {
        Ok(expanded) => expanded,
        Err(e) => {
            log::trace!("Leaving '{}' unexpanded: {}", text, e);
            Cow::Borrowed(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_user_path_without_tokens_is_borrowed() {
        assert!(matches!(expand_user_path("src/main.rs"), Cow::Borrowed("src/main.rs")));
    }

    #[test]
    fn test_expand_user_path_keeps_unknown_variables() {
        let text = "$FIXLINE_SURELY_UNDEFINED_VAR/x";
        assert_eq!(expand_user_path(text), text);
    }

    #[test]
    fn test_expand_user_path_expands_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_user_path("~/project");
            assert_eq!(PathBuf::from(expanded.into_owned()), home.join("project"));
        }
    }
}
