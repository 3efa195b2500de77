// src/core/vcs_grammar.rs

use crate::{
    core::{
        context::CompletionContext,
        grammar::{Grammar, LeafKind, Lexeme},
    },
    models::{Commit, CompletionResult, Token},
};
use std::{collections::BTreeSet, fmt};

/// Read-only queries against a version-controlled working tree.
///
/// Implementations must not fail: a missing repository or a broken VCS
/// installation reports empty history.
pub trait VcsProvider: fmt::Debug {
    /// Up to `limit` commits, most recent first.
    fn recent_commits(&self, limit: usize) -> Vec<Commit>;
    /// Short names of all local branches and tags.
    fn branches_and_tags(&self) -> Vec<String>;
}

/// Used when no repository is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepository;

impl VcsProvider for NoRepository {
    fn recent_commits(&self, _limit: usize) -> Vec<Commit> {
        Vec::new()
    }

    fn branches_and_tags(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A commit SHA, branch or tag.
pub fn vcs_grammar() -> Grammar {
    Grammar::Dynamic {
        kind: LeafKind::VcsRef,
        lexeme: Lexeme::Unquoted,
    }
}

/// `|rank| summary`, with the rank padded so summaries line up through two digits.
fn commit_display(rank: usize, summary: &str) -> String {
    format!("{:<4} {}", format!("|{rank}|"), summary)
}

/// Recent commits whose SHA starts with `typed` (ranked by recency), then
/// branches and tags starting with `typed` (alphabetical).
///
/// A branch whose name is also a SHA prefix shows up once per source; the two
/// tokens differ in display, so they are kept apart.
pub fn complete(typed: &str, ctx: &CompletionContext<'_>) -> CompletionResult {
    let commits = ctx
        .vcs
        .recent_commits(ctx.history_limit)
        .into_iter()
        .enumerate()
        .filter(|(_, commit)| commit.sha1.starts_with(typed))
        .map(|(index, commit)| {
            let append = commit.sha1.get(typed.len()..).unwrap_or_default();
            Token::new(commit_display(index + 1, &commit.summary), append)
        });

    let names: BTreeSet<String> = ctx.vcs.branches_and_tags().into_iter().collect();
    let refs = names
        .into_iter()
        .filter(|name| name.starts_with(typed))
        .map(|name| {
            let append = name.get(typed.len()..).unwrap_or_default().to_string();
            Token::new(name, append)
        });

    CompletionResult::strict(commits.chain(refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::TestEnv;

    #[test]
    fn test_commits_ranked_by_recency() {
        let env = TestEnv::new().with_vcs(&[("fix bug", "abc123"), ("add feature", "abcdef")], &[]);
        let result = vcs_grammar().complete("abc", 3, &env.ctx()).unwrap();
        let tokens = result.tokens();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].display.starts_with("|1|"));
        assert!(tokens[0].display.ends_with("fix bug"));
        assert_eq!(tokens[0].append, "123");
        assert!(tokens[1].display.starts_with("|2|"));
        assert_eq!(tokens[1].append, "def");
    }

    #[test]
    fn test_rank_is_padded_for_two_digits() {
        assert_eq!(commit_display(1, "a"), "|1|  a");
        assert_eq!(commit_display(12, "b"), "|12| b");
    }

    #[test]
    fn test_branches_and_tags_follow_commits_alphabetically() {
        let env = TestEnv::new().with_vcs(
            &[("init", "ff00aa")],
            &["v1.0", "main", "feature/x", "fix-typo"],
        );
        let result = vcs_grammar().complete("f", 1, &env.ctx()).unwrap();
        let displays: Vec<_> = result.tokens().iter().map(|t| t.display.as_str()).collect();
        assert_eq!(displays, vec!["|1|  init", "feature/x", "fix-typo"]);
        assert_eq!(result.tokens()[1].append, "eature/x");
    }

    #[test]
    fn test_branch_named_like_sha_prefix_appears_once_per_source() {
        let env = TestEnv::new().with_vcs(&[("fix bug", "abc123")], &["abc"]);
        let result = vcs_grammar().complete("ab", 2, &env.ctx()).unwrap();
        assert_eq!(
            result.tokens(),
            &[Token::new("|1|  fix bug", "c123"), Token::new("abc", "c")]
        );
    }

    #[test]
    fn test_history_scan_is_capped() {
        let commits: Vec<(String, String)> = (0..30)
            .map(|i| (format!("commit {i}"), format!("a{i:02}")))
            .collect();
        let borrowed: Vec<(&str, &str)> = commits
            .iter()
            .map(|(s, h)| (s.as_str(), h.as_str()))
            .collect();
        let env = TestEnv::new().with_vcs(&borrowed, &[]);
        let result = vcs_grammar().complete("a", 1, &env.ctx()).unwrap();
        assert_eq!(result.tokens().len(), 20);
    }

    #[test]
    fn test_without_repository_there_is_nothing_to_offer() {
        let env = TestEnv::new();
        let result = vcs_grammar().complete("", 0, &env.ctx()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_any_text_is_accepted() {
        let env = TestEnv::new();
        assert_eq!(vcs_grammar().parse("origin/main", &env.ctx()).unwrap(), vec!["origin/main"]);
    }
}
