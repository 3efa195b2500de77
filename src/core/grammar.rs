// src/core/grammar.rs

//! # Grammar Engine
//!
//! A command line grammar is a tree of [`Grammar`] nodes. Evaluating a node at an
//! offset yields every way it can match there (list-of-successes backtracking), the
//! farthest failure seen, and, when the input ends inside a token, the completion
//! candidates for that token.
//!
//! Completion always runs over the input truncated at the cursor, so a token "reaches
//! the cursor" exactly when it runs into the end of the evaluated text.

use crate::{
    core::{
        context::CompletionContext,
        path_grammar::{self, PathValue},
        rule_grammar, vcs_grammar,
    },
    models::{CompletionResult, Token},
};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Unexpected input at offset {position}: expected {expected}")]
    Syntax { position: usize, expected: String },
    #[error("Invalid value at offset {position}: {message}")]
    Validation { position: usize, message: String },
    #[error("Cursor offset {cursor} is not a character boundary inside the input (length {length}).")]
    CursorOutOfRange { cursor: usize, length: usize },
}

impl GrammarError {
    /// Byte offset in the input the error refers to.
    pub fn position(&self) -> usize {
        match self {
            Self::Syntax { position, .. } | Self::Validation { position, .. } => *position,
            Self::CursorOutOfRange { cursor, .. } => *cursor,
        }
    }
}

/// Post-processing applied to a matched value. An `Err` rejects the match with that message.
pub type Validator = fn(&str) -> Result<String, String>;

/// How the characters of a dynamic token are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// A double- or single-quoted string, or bare text up to whitespace or a stop character.
    Quotable { stops: &'static [char] },
    /// Bare text up to whitespace. Quotes are ordinary characters.
    Unquoted,
    /// A run of rule-name characters not starting with `-`.
    Identifier,
}

/// What a dynamic token means. Selects its completion function and its accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// Free text. Never suggests anything.
    Text,
    Path(PathValue),
    RuleName,
    VcsRef,
}

impl LeafKind {
    fn complete(self, typed: &str, ctx: &CompletionContext<'_>) -> CompletionResult {
        match self {
            Self::Text => CompletionResult::unconstrained(),
            Self::Path(_) => path_grammar::complete(typed, ctx),
            Self::RuleName => rule_grammar::complete_rule_name(typed, ctx),
            Self::VcsRef => vcs_grammar::complete(typed, ctx),
        }
    }

    fn accept(self, text: &str, ctx: &CompletionContext<'_>) -> String {
        match self {
            Self::Path(PathValue::Absolute) => path_grammar::resolve(text, ctx.cwd)
                .to_string_lossy()
                .into_owned(),
            _ => text.to_string(),
        }
    }

    fn expectation(self) -> &'static str {
        match self {
            Self::Text => "a value",
            Self::Path(_) => "a path",
            Self::RuleName => "a rule name",
            Self::VcsRef => "a commit, branch or tag",
        }
    }
}

/// A node of a command line grammar.
#[derive(Debug, Clone)]
pub enum Grammar {
    /// One or more whitespace characters. Produces no words.
    Space,
    /// A fixed token. `value` is the word it produces, which lets an alias stand for its long form.
    Literal {
        text: &'static str,
        value: &'static str,
    },
    /// Arbitrary text with a completion function.
    Dynamic { kind: LeafKind, lexeme: Lexeme },
    Seq(Vec<Grammar>),
    /// Tagged alternatives, tried in order. Earlier alternatives rank first.
    Alt(Vec<Grammar>),
    /// Zero or more repetitions.
    Many(Box<Grammar>),
    Optional(Box<Grammar>),
    /// `item (separator item)*`, producing a single word re-joined with the first separator.
    Joined {
        item: Box<Grammar>,
        separators: &'static [char],
    },
    MapOrFail(Box<Grammar>, Validator),
    /// Matches like its inner node but never suggests anything.
    Hidden(Box<Grammar>),
    /// Glues the inner words into one.
    Concat(Box<Grammar>),
    /// Replaces failures at the node's own start with a single expectation.
    Labeled(&'static str, Box<Grammar>),
}

// --- EVALUATION STATE ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Parse,
    Complete,
}

struct Scan<'a> {
    input: &'a str,
    ctx: &'a CompletionContext<'a>,
    mode: Mode,
}

impl Scan<'_> {
    fn rest(&self, pos: usize) -> &str {
        self.input.get(pos..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    Syntax,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    position: usize,
    kind: FailureKind,
    messages: Vec<String>,
}

impl Failure {
    fn new(position: usize, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            messages: vec![message.into()],
        }
    }

    /// Farthest failure wins. At the same offset a validation failure is more
    /// specific than a syntax one, and syntax expectations accumulate.
    fn merge(mut self, other: Self) -> Self {
        match self.position.cmp(&other.position) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => match (self.kind, other.kind) {
                (FailureKind::Validation, FailureKind::Syntax) => self,
                (FailureKind::Syntax, FailureKind::Validation) => other,
                _ => {
                    for message in other.messages {
                        if !self.messages.contains(&message) {
                            self.messages.push(message);
                        }
                    }
                    self
                }
            },
        }
    }

    fn into_error(self) -> GrammarError {
        match self.kind {
            FailureKind::Syntax => GrammarError::Syntax {
                position: self.position,
                expected: self.messages.join(" or "),
            },
            FailureKind::Validation => GrammarError::Validation {
                position: self.position,
                message: self.messages.join("; "),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Success {
    end: usize,
    words: Vec<String>,
}

#[derive(Debug, Default)]
struct Outcome {
    successes: Vec<Success>,
    completions: Option<CompletionResult>,
    failure: Option<Failure>,
}

impl Outcome {
    fn matched(end: usize, words: Vec<String>) -> Self {
        Self {
            successes: vec![Success { end, words }],
            ..Self::default()
        }
    }

    fn failed(position: usize, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            failure: Some(Failure::new(position, kind, message)),
            ..Self::default()
        }
    }

    fn suggest(&mut self, result: CompletionResult) {
        self.completions = Some(match self.completions.take() {
            Some(existing) => existing.merge(result),
            None => result,
        });
    }

    fn record(&mut self, failure: Option<Failure>) {
        self.failure = match (self.failure.take(), failure) {
            (None, other) | (other, None) => other,
            (Some(mine), Some(theirs)) => Some(mine.merge(theirs)),
        };
    }

    /// Keeps the completions and failure of `other` and hands back its successes.
    fn absorb(&mut self, other: Self) -> Vec<Success> {
        if let Some(completions) = other.completions {
            self.suggest(completions);
        }
        self.record(other.failure);
        other.successes
    }
}

fn push_unique(states: &mut Vec<Success>, state: Success) {
    if !states.contains(&state) {
        states.push(state);
    }
}

fn extend_words(prefix: &[String], words: Vec<String>) -> Vec<String> {
    let mut combined = prefix.to_vec();
    combined.extend(words);
    combined
}

// --- LEXING ---

struct Lexed {
    consumed: usize,
    text: String,
    /// The token runs into the end of the evaluated input.
    open: bool,
    well_formed: bool,
}

fn lex(rest: &str, lexeme: Lexeme) -> Lexed {
    match lexeme {
        // A leading dash belongs to the flag table, never to a name.
        Lexeme::Identifier if rest.starts_with('-') => Lexed {
            consumed: 0,
            text: String::new(),
            open: false,
            well_formed: false,
        },
        Lexeme::Identifier => lex_bare(rest, rule_grammar::is_rule_name_char),
        Lexeme::Unquoted => lex_bare(rest, |c| !c.is_whitespace()),
        Lexeme::Quotable { stops } => {
            if rest.starts_with(['"', '\'']) {
                lex_quoted(rest)
            } else {
                lex_bare(rest, |c| !c.is_whitespace() && !stops.contains(&c))
            }
        }
    }
}

fn lex_bare(rest: &str, accept: impl Fn(char) -> bool) -> Lexed {
    let consumed = rest
        .char_indices()
        .find(|(_, c)| !accept(*c))
        .map_or(rest.len(), |(index, _)| index);
    Lexed {
        consumed,
        text: rest.get(..consumed).unwrap_or_default().to_string(),
        open: consumed == rest.len(),
        well_formed: consumed > 0,
    }
}

/// Quoted tokens follow shell rules; the unquoting itself is left to `shlex`.
fn lex_quoted(rest: &str) -> Lexed {
    let quote = rest.chars().next().unwrap_or('"');
    let mut escaped = false;
    let mut end = None;
    for (index, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' && quote == '"' {
            escaped = true;
        } else if c == quote {
            end = Some(index + c.len_utf8());
            break;
        }
    }

    let single_word = |raw: &str| {
        shlex::split(raw).and_then(|mut words| if words.len() == 1 { words.pop() } else { None })
    };

    match end {
        Some(end) => {
            let text = rest.get(..end).and_then(single_word);
            Lexed {
                consumed: end,
                well_formed: text.is_some(),
                text: text.unwrap_or_default(),
                open: false,
            }
        }
        None => {
            // Unterminated: complete against what the closed string would contain.
            let text = single_word(&format!("{rest}{quote}"))
                .unwrap_or_else(|| rest.get(quote.len_utf8()..).unwrap_or_default().to_string());
            Lexed {
                consumed: rest.len(),
                text,
                open: true,
                well_formed: false,
            }
        }
    }
}

// --- EVALUATION ---

impl Grammar {
    fn eval(&self, scan: &Scan<'_>, pos: usize) -> Outcome {
        match self {
            Self::Space => {
                let width: usize = scan
                    .rest(pos)
                    .chars()
                    .take_while(|c| c.is_whitespace())
                    .map(char::len_utf8)
                    .sum();
                if width == 0 {
                    Outcome::failed(pos, FailureKind::Syntax, "whitespace")
                } else {
                    Outcome::matched(pos + width, Vec::new())
                }
            }

            Self::Literal { text, value } => {
                let rest = scan.rest(pos);
                let mut outcome = if rest.starts_with(text) {
                    Outcome::matched(pos + text.len(), vec![(*value).to_string()])
                } else {
                    Outcome::failed(pos, FailureKind::Syntax, format!("'{text}'"))
                };
                if scan.mode == Mode::Complete && text.starts_with(rest) {
                    let append = text.get(rest.len()..).unwrap_or_default();
                    outcome.suggest(CompletionResult::strict([Token::new(*text, append)]));
                }
                outcome
            }

            Self::Dynamic { kind, lexeme } => {
                let lexed = lex(scan.rest(pos), *lexeme);
                let mut outcome = if lexed.well_formed {
                    Outcome::matched(pos + lexed.consumed, vec![kind.accept(&lexed.text, scan.ctx)])
                } else {
                    Outcome::failed(pos, FailureKind::Syntax, kind.expectation())
                };
                if scan.mode == Mode::Complete && lexed.open {
                    outcome.suggest(kind.complete(&lexed.text, scan.ctx));
                }
                outcome
            }

            Self::Seq(parts) => {
                let mut outcome = Outcome::default();
                let mut frontier = vec![Success {
                    end: pos,
                    words: Vec::new(),
                }];
                for part in parts {
                    let mut next = Vec::new();
                    for state in &frontier {
                        for step in outcome.absorb(part.eval(scan, state.end)) {
                            push_unique(
                                &mut next,
                                Success {
                                    end: step.end,
                                    words: extend_words(&state.words, step.words),
                                },
                            );
                        }
                    }
                    frontier = next;
                    if frontier.is_empty() {
                        break;
                    }
                }
                outcome.successes = frontier;
                outcome
            }

            Self::Alt(alternatives) => {
                let mut outcome = Outcome::default();
                let mut successes = Vec::new();
                for alternative in alternatives {
                    for success in outcome.absorb(alternative.eval(scan, pos)) {
                        push_unique(&mut successes, success);
                    }
                }
                outcome.successes = successes;
                outcome
            }

            Self::Many(item) => {
                let mut outcome = Outcome::default();
                let start = Success {
                    end: pos,
                    words: Vec::new(),
                };
                let mut all = vec![start.clone()];
                let mut frontier = vec![start];
                while !frontier.is_empty() {
                    let mut next = Vec::new();
                    for state in &frontier {
                        for step in outcome.absorb(item.eval(scan, state.end)) {
                            // Zero-width repetitions would never terminate.
                            if step.end > state.end {
                                push_unique(
                                    &mut next,
                                    Success {
                                        end: step.end,
                                        words: extend_words(&state.words, step.words),
                                    },
                                );
                            }
                        }
                    }
                    for state in &next {
                        push_unique(&mut all, state.clone());
                    }
                    frontier = next;
                }
                outcome.successes = all;
                outcome
            }

            Self::Optional(inner) => {
                let mut outcome = Outcome::default();
                let mut successes = outcome.absorb(inner.eval(scan, pos));
                push_unique(
                    &mut successes,
                    Success {
                        end: pos,
                        words: Vec::new(),
                    },
                );
                outcome.successes = successes;
                outcome
            }

            Self::Joined { item, separators } => {
                let mut outcome = Outcome::default();
                let mut frontier = outcome.absorb(item.eval(scan, pos));
                let mut all = frontier.clone();
                while !frontier.is_empty() {
                    let mut next = Vec::new();
                    for state in &frontier {
                        let Some(separator) = scan
                            .rest(state.end)
                            .chars()
                            .next()
                            .filter(|c| separators.contains(c))
                        else {
                            continue;
                        };
                        let item_start = state.end + separator.len_utf8();
                        for step in outcome.absorb(item.eval(scan, item_start)) {
                            push_unique(
                                &mut next,
                                Success {
                                    end: step.end,
                                    words: extend_words(&state.words, step.words),
                                },
                            );
                        }
                    }
                    for state in &next {
                        push_unique(&mut all, state.clone());
                    }
                    frontier = next;
                }
                let joiner = separators.first().map(char::to_string).unwrap_or_default();
                outcome.successes = all
                    .into_iter()
                    .map(|state| Success {
                        end: state.end,
                        words: vec![state.words.join(&joiner)],
                    })
                    .collect();
                outcome
            }

            Self::MapOrFail(inner, validate) => {
                let mut outcome = Outcome::default();
                let mut successes = Vec::new();
                for success in outcome.absorb(inner.eval(scan, pos)) {
                    match validate(&success.words.join(" ")) {
                        Ok(value) => push_unique(
                            &mut successes,
                            Success {
                                end: success.end,
                                words: vec![value],
                            },
                        ),
                        Err(message) => {
                            log::debug!("Value at offset {} rejected: {}", pos, message);
                            outcome.record(Some(Failure::new(
                                pos,
                                FailureKind::Validation,
                                message,
                            )));
                        }
                    }
                }
                outcome.successes = successes;
                outcome
            }

            Self::Hidden(inner) => {
                let mut outcome = inner.eval(scan, pos);
                outcome.completions = None;
                outcome
            }

            Self::Concat(inner) => {
                let mut outcome = inner.eval(scan, pos);
                for success in &mut outcome.successes {
                    success.words = vec![success.words.concat()];
                }
                outcome
            }

            Self::Labeled(label, inner) => {
                let mut outcome = inner.eval(scan, pos);
                if let Some(failure) = &mut outcome.failure
                    && failure.position == pos
                    && failure.kind == FailureKind::Syntax
                {
                    failure.messages = vec![(*label).to_string()];
                }
                outcome
            }
        }
    }

    /// Parses the whole input, returning the words of the first complete match.
    pub fn parse(&self, input: &str, ctx: &CompletionContext<'_>) -> Result<Vec<String>, GrammarError> {
        let scan = Scan {
            input,
            ctx,
            mode: Mode::Parse,
        };
        let outcome = self.eval(&scan, 0);

        let farthest = outcome.successes.iter().map(|s| s.end).max().unwrap_or(0);
        if let Some(complete) = outcome.successes.into_iter().find(|s| s.end == input.len()) {
            log::debug!("Parsed '{}' into {:?}", input, complete.words);
            return Ok(complete.words);
        }

        Err(match outcome.failure {
            Some(failure) if failure.position >= farthest => failure.into_error(),
            _ => GrammarError::Syntax {
                position: farthest,
                expected: "end of input".to_string(),
            },
        })
    }

    /// Computes the candidates for the token under `cursor`, looking only at the text before it.
    pub fn complete(
        &self,
        input: &str,
        cursor: usize,
        ctx: &CompletionContext<'_>,
    ) -> Result<CompletionResult, GrammarError> {
        let typed = input
            .get(..cursor)
            .ok_or(GrammarError::CursorOutOfRange {
                cursor,
                length: input.len(),
            })?;
        let scan = Scan {
            input: typed,
            ctx,
            mode: Mode::Complete,
        };
        let result = match self.eval(&scan, 0).completions {
            Some(CompletionResult::Strict(tokens)) => CompletionResult::strict(
                tokens.into_iter().map(|token| token.truncated(ctx.width)),
            ),
            _ => CompletionResult::unconstrained(),
        };
        log::trace!("Completion at {} of '{}': {:?}", cursor, input, result);
        Ok(result)
    }
}
