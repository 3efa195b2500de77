// src/core/testing.rs
// Shared fixtures for unit tests.

use crate::{
    core::{catalog::StaticCatalog, context::CompletionContext, vcs_grammar::VcsProvider},
    models::{Commit, RuleInfo},
};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub(crate) struct FakeVcs {
    pub(crate) commits: Vec<Commit>,
    pub(crate) refs: Vec<String>,
}

impl VcsProvider for FakeVcs {
    fn recent_commits(&self, limit: usize) -> Vec<Commit> {
        self.commits.iter().take(limit).cloned().collect()
    }

    fn branches_and_tags(&self) -> Vec<String> {
        self.refs.clone()
    }
}

#[derive(Debug)]
pub(crate) struct TestEnv {
    pub(crate) cwd: PathBuf,
    pub(crate) catalog: StaticCatalog,
    pub(crate) vcs: FakeVcs,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self {
            cwd: PathBuf::from("/home/u"),
            catalog: StaticCatalog::default(),
            vcs: FakeVcs::default(),
        }
    }

    pub(crate) fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub(crate) fn with_rules(mut self, rules: &[(&str, &str)]) -> Self {
        self.catalog = StaticCatalog::new(
            rules
                .iter()
                .map(|(name, description)| RuleInfo::new(*name, *description))
                .collect(),
        );
        self
    }

    pub(crate) fn with_vcs(mut self, commits: &[(&str, &str)], refs: &[&str]) -> Self {
        self.vcs = FakeVcs {
            commits: commits
                .iter()
                .map(|(summary, sha1)| Commit::new(*summary, *sha1))
                .collect(),
            refs: refs.iter().map(|r| (*r).to_string()).collect(),
        };
        self
    }

    pub(crate) fn ctx(&self) -> CompletionContext<'_> {
        CompletionContext::new(&self.cwd, &self.catalog, &self.vcs)
    }
}
