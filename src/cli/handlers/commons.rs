// src/cli/handlers/commons.rs

// Shared setup for the handlers: settings, catalog, repository and display width.

use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    constants::DEFAULT_TERMINAL_WIDTH,
    core::{
        catalog::StaticCatalog, config_loader, context::CompletionContext, grammar::GrammarError,
        path_grammar,
    },
    models::Settings,
    system::{git::GitRepository, terminal},
};

/// Everything a request is evaluated against, owned for the duration of one command.
#[derive(Debug)]
pub struct Session {
    pub cwd: PathBuf,
    pub catalog: StaticCatalog,
    pub vcs: GitRepository,
    pub settings: Settings,
}

impl Session {
    /// Loads the user settings and roots the repository at `cwd` (or the process directory).
    pub fn open(cwd: Option<&Path>) -> Result<Self> {
        let settings = config_loader::load_settings().context("Failed to load settings")?;
        Ok(Self::with_settings(resolve_cwd(cwd)?, settings))
    }

    pub fn with_settings(cwd: PathBuf, settings: Settings) -> Self {
        let catalog = StaticCatalog::builtin().with_extra(settings.rules.clone());
        let vcs = GitRepository::new(&cwd);
        Self {
            cwd,
            catalog,
            vcs,
            settings,
        }
    }

    pub fn ctx(&self) -> CompletionContext<'_> {
        let width = self
            .settings
            .terminal_width
            .unwrap_or_else(|| terminal::terminal_width(DEFAULT_TERMINAL_WIDTH));
        CompletionContext::new(&self.cwd, &self.catalog, &self.vcs)
            .with_width(width)
            .with_history_limit(self.settings.history_limit)
    }
}

/// The directory requests are evaluated in, absolute and normalized.
fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = env::current_dir().context("Could not determine the current directory")?;
    Ok(match cwd {
        Some(dir) => path_grammar::resolve(&dir.to_string_lossy(), &current),
        None => dunce::simplified(&current).to_path_buf(),
    })
}

/// The line with a caret under the offset the error refers to.
pub fn render_diagnostic(line: &str, error: &GrammarError) -> String {
    let column = line
        .get(..error.position())
        .map_or_else(|| line.chars().count(), |head| head.chars().count());
    format!("  {line}\n  {}^", " ".repeat(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::catalog::RuleCatalog, models::RuleInfo};
    use tempfile::tempdir;

    #[test]
    fn test_caret_points_at_error_offset() {
        let error = GrammarError::Syntax {
            position: 7,
            expected: "a flag".to_string(),
        };
        assert_eq!(render_diagnostic("--test --bogus", &error), "  --test --bogus\n         ^");
    }

    #[test]
    fn test_caret_counts_characters_not_bytes() {
        let error = GrammarError::Validation {
            position: "é ".len(),
            message: "x".to_string(),
        };
        assert_eq!(render_diagnostic("é z", &error), "  é z\n    ^");
    }

    #[test]
    fn test_session_uses_configured_width_and_rules() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            history_limit: 3,
            terminal_width: Some(33),
            rules: vec![RuleInfo::new("ZzCustom", "")],
        };
        let session = Session::with_settings(dir.path().to_path_buf(), settings);
        let ctx = session.ctx();
        assert_eq!(ctx.width, 33);
        assert_eq!(ctx.history_limit, 3);
        assert!(ctx.catalog.rules().iter().any(|rule| rule.name == "ZzCustom"));
    }
}
