// src/core/assembler.rs

//! # Command Grammar
//!
//! Assembles the flag table and the value grammars into the grammar of a
//! whole command line.
//!
//! - **Full mode:** `[flag (space flag)*] [space path]`, flags in any order and
//!   repeatable, with an optional trailing positional path.
//! - **Compat mode:** `[rule (space rule)*]`, a bare list of rule references.
//!
//! Leading and trailing whitespace is tolerated in both modes.

use crate::{
    core::{
        combinators::{map_or_fail, one_of, opt_space, optional, separated, seq, space},
        context::CompletionContext,
        flags::{FlagValue, find_flag, flag_grammar},
        grammar::{Grammar, GrammarError},
        path_grammar::raw_path_grammar,
        rule_grammar::{RuleRef, rule_grammar},
    },
    models::CompletionResult,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarMode {
    /// Only a list of rule references.
    Compat,
    /// Flags followed by an optional positional path.
    Full,
}

/// What a request produced: candidates for the cursor, or the parsed command.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Evaluation {
    Completions(CompletionResult),
    Parsed(Vec<String>),
}

/// One argument of a parsed line: a flag with its value, a rule reference, or the trailing path.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// `bare`, `file` or the URI scheme, for rule references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_kind: Option<&'static str>,
}

/// The grammar of a complete command line.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    mode: GrammarMode,
    root: Grammar,
}

impl CommandGrammar {
    pub fn new(compat: bool) -> Self {
        if compat { Self::compat() } else { Self::full() }
    }

    pub fn compat() -> Self {
        Self {
            mode: GrammarMode::Compat,
            root: seq(vec![opt_space(), optional(separated(rule_grammar())), opt_space()]),
        }
    }

    pub fn full() -> Self {
        let flags = separated(flag_grammar());
        let body = one_of(vec![
            seq(vec![flags, optional(seq(vec![space(), positional_path()]))]),
            positional_path(),
        ]);
        Self {
            mode: GrammarMode::Full,
            root: seq(vec![opt_space(), optional(body), opt_space()]),
        }
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    /// Parses a complete line into its flattened argument words.
    pub fn parse(&self, line: &str, ctx: &CompletionContext<'_>) -> Result<Vec<String>, GrammarError> {
        self.root.parse(line, ctx)
    }

    /// Candidates for the token under `cursor`.
    pub fn complete(
        &self,
        line: &str,
        cursor: usize,
        ctx: &CompletionContext<'_>,
    ) -> Result<CompletionResult, GrammarError> {
        self.root.complete(line, cursor, ctx)
    }

    /// Returns the parsed words once the line is finished: the cursor is at the
    /// end, the line parses, and no candidate would extend the last token.
    /// Anything else is a completion request.
    pub fn evaluate(
        &self,
        line: &str,
        cursor: usize,
        ctx: &CompletionContext<'_>,
    ) -> Result<Evaluation, GrammarError> {
        let completions = self.complete(line, cursor, ctx)?;
        let settled = completions.tokens().iter().all(|token| token.append.is_empty());
        if cursor == line.len()
            && settled
            && let Ok(words) = self.parse(line, ctx)
        {
            return Ok(Evaluation::Parsed(words));
        }
        Ok(Evaluation::Completions(completions))
    }

    /// Groups parsed words into arguments and classifies rule references.
    pub fn arguments(&self, words: Vec<String>) -> Vec<Argument> {
        let mut arguments = Vec::new();
        let mut words = words.into_iter();
        while let Some(word) = words.next() {
            let flag = match self.mode {
                GrammarMode::Full => find_flag(&word),
                GrammarMode::Compat => None,
            };
            let argument = match flag {
                Some(definition) => {
                    let value = definition.value.and_then(|_| words.next());
                    let kind = match definition.value {
                        Some(FlagValue::Rule) => value.as_deref().and_then(rule_kind),
                        _ => None,
                    };
                    Argument {
                        flag: Some(definition.long),
                        value,
                        rule_kind: kind,
                    }
                }
                None => Argument {
                    flag: None,
                    rule_kind: match self.mode {
                        GrammarMode::Compat => rule_kind(&word),
                        GrammarMode::Full => None,
                    },
                    value: Some(word),
                },
            };
            arguments.push(argument);
        }
        arguments
    }
}

fn rule_kind(text: &str) -> Option<&'static str> {
    text.parse::<RuleRef>().ok().map(|rule| rule.kind())
}

/// The trailing base directory, kept as typed. Text shaped like a flag is left to the flag table.
fn positional_path() -> Grammar {
    map_or_fail(raw_path_grammar(), reject_flag_like)
}

fn reject_flag_like(text: &str) -> Result<String, String> {
    if text.starts_with('-') {
        Err(format!("'{text}' is not a recognized flag"))
    } else {
        Ok(text.to_string())
    }
}
