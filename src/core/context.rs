// src/core/context.rs

use crate::{
    constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_TERMINAL_WIDTH},
    core::{catalog::RuleCatalog, vcs_grammar::VcsProvider},
};
use std::path::Path;

/// Everything a completion function may consult besides the typed text.
///
/// Grammars never capture state of their own; the collaborators are handed in
/// here on every request so the same grammar can be evaluated against a real
/// repository or against fakes.
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    pub cwd: &'a Path,
    pub catalog: &'a dyn RuleCatalog,
    pub vcs: &'a dyn VcsProvider,
    /// Columns available for a candidate's display text.
    pub width: usize,
    /// How many commits are scanned for SHA completion.
    pub history_limit: usize,
}

impl<'a> CompletionContext<'a> {
    pub fn new(cwd: &'a Path, catalog: &'a dyn RuleCatalog, vcs: &'a dyn VcsProvider) -> Self {
        Self {
            cwd,
            catalog,
            vcs,
            width: DEFAULT_TERMINAL_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::core::testing::TestEnv;

    #[test]
    fn test_width_never_drops_to_zero() {
        let env = TestEnv::new();
        assert_eq!(env.ctx().with_width(0).width, 1);
        assert_eq!(env.ctx().with_width(120).width, 120);
    }
}
