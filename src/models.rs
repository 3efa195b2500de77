// src/models.rs

use crate::constants::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// --- COMPLETION MODELS ---

/// A single completion candidate.
///
/// `display` is what the user sees in a menu. `append` is what gets inserted
/// after the text already typed, so `typed + append` is always a valid value
/// for the grammar position that produced the token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub display: String,
    pub append: String,
}

impl Token {
    pub fn new(display: impl Into<String>, append: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            append: append.into(),
        }
    }

    /// Elides `display` so it fits in `width` columns. `append` is never touched.
    pub fn truncated(mut self, width: usize) -> Self {
        if self.display.chars().count() > width {
            let keep = width.saturating_sub(3);
            let mut shortened: String = self.display.chars().take(keep).collect();
            if width >= 3 {
                shortened.push_str("...");
            }
            self.display = shortened;
        }
        self
    }
}

/// The answer to a completion request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "tokens", rename_all = "snake_case")]
pub enum CompletionResult {
    /// Any text is acceptable here and there is nothing useful to suggest.
    Unconstrained,
    /// Exactly these continuations are valid, in ranking order.
    Strict(Vec<Token>),
}

impl CompletionResult {
    /// Builds a strict result. Duplicate tokens collapse, first occurrence wins the rank.
    pub fn strict(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut seen = HashSet::new();
        let unique = tokens
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect();
        Self::Strict(unique)
    }

    pub fn unconstrained() -> Self {
        Self::Unconstrained
    }

    /// The candidates of a strict result; empty for an unconstrained one.
    pub fn tokens(&self) -> &[Token] {
        match self {
            Self::Unconstrained => &[],
            Self::Strict(tokens) => tokens,
        }
    }

    /// True when there is nothing to show to the user.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// Unions two results. A strict side always wins over an unconstrained one.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unconstrained, other) => other,
            (this, Self::Unconstrained) => this,
            (Self::Strict(mut left), Self::Strict(right)) => {
                left.extend(right);
                Self::strict(left)
            }
        }
    }
}

// --- COLLABORATOR MODELS ---

/// An entry of the rule catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl RuleInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One line of commit history as reported by the VCS collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub summary: String,
    pub sha1: String,
}

impl Commit {
    pub fn new(summary: impl Into<String>, sha1: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            sha1: sha1.into(),
        }
    }
}

// --- CONFIGURATION MODELS ---
// These are what the user writes in ~/.config/fixline/config.toml

/// User settings. Every field is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Settings {
    /// How many commits are scanned for SHA completion.
    pub history_limit: usize,
    /// Fixed display width. When absent the terminal is queried.
    pub terminal_width: Option<usize>,
    /// Extra catalog entries appended after the built-in rules.
    pub rules: Vec<RuleInfo>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            terminal_width: None,
            rules: Vec::new(),
        }
    }
}
