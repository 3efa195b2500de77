// src/system/git.rs

use crate::{
    core::vcs_grammar::VcsProvider,
    models::Commit,
    system::executor::{self, ExecutionError},
};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

lazy_static! {
    // `<sha>\t<summary>`, one commit per line of `git log`.
    static ref LOG_LINE_RE: Regex =
        Regex::new(r"^([0-9a-f]{7,64})\t(.*)$").expect("commit line pattern is valid");
}

/// History and refs of the git working tree containing `root`, read by running `git`.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn run(&self, command_line: &str) -> Result<String, ExecutionError> {
        executor::execute_and_capture_output(command_line, &self.root)
    }
}

impl VcsProvider for GitRepository {
    fn recent_commits(&self, limit: usize) -> Vec<Commit> {
        if limit == 0 {
            return Vec::new();
        }
        match self.run(&format!("git log -n {limit} --format=%H%x09%s")) {
            Ok(output) => parse_log(&output),
            Err(e) => {
                log::debug!("No commit history for '{}': {}", self.root.display(), e);
                Vec::new()
            }
        }
    }

    fn branches_and_tags(&self) -> Vec<String> {
        match self.run("git for-each-ref --format=%(refname:short) refs/heads refs/tags") {
            Ok(output) => parse_refs(&output),
            Err(e) => {
                log::debug!("No refs for '{}': {}", self.root.display(), e);
                Vec::new()
            }
        }
    }
}

/// Parses `git log --format=%H%x09%s` output. Lines that do not look like a commit are skipped.
pub fn parse_log(output: &str) -> Vec<Commit> {
    output
        .lines()
        .filter_map(|line| {
            let captures = LOG_LINE_RE.captures(line)?;
            let sha1 = captures.get(1)?.as_str();
            let summary = captures.get(2)?.as_str();
            Some(Commit::new(summary, sha1))
        })
        .collect()
}

fn parse_refs(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
