// src/core/rule_grammar.rs

use crate::{
    constants::DESCRIPTION_SEPARATOR,
    core::{
        combinators::{concat, labeled, literal, not_quoted, one_of, seq},
        context::CompletionContext,
        grammar::{Grammar, LeafKind, Lexeme},
        path_grammar::path_grammar,
    },
    models::{CompletionResult, RuleInfo, Token},
};
use std::{fmt, path::PathBuf, str::FromStr};
use thiserror::Error;

const FILE_PREFIX: &str = "file:";

/// URI schemes a rule can be fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriScheme {
    Github,
    Replace,
    Http,
    Https,
    Scala,
}

impl UriScheme {
    pub const ALL: [Self; 5] = [
        Self::Github,
        Self::Replace,
        Self::Http,
        Self::Https,
        Self::Scala,
    ];

    /// The scheme with its trailing colon, as typed on the command line.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Github => "github:",
            Self::Replace => "replace:",
            Self::Http => "http:",
            Self::Https => "https:",
            Self::Scala => "scala:",
        }
    }
}

/// A parsed reference to a rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleRef {
    /// A name looked up in the rule catalog.
    Bare(String),
    /// `file:<path>`, a rule defined in a local source file.
    File(PathBuf),
    /// `<scheme>:<rest>`, fetched or interpreted according to the scheme.
    Uri { scheme: UriScheme, rest: String },
}

impl RuleRef {
    /// Short name of the reference form: `bare`, `file`, or the URI scheme.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bare(_) => "bare",
            Self::File(_) => "file",
            Self::Uri { scheme, .. } => scheme.prefix().trim_end_matches(':'),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a recognized rule reference")]
pub struct RuleRefError(pub String);

impl FromStr for RuleRef {
    type Err = RuleRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix(FILE_PREFIX)
            && !path.is_empty()
        {
            return Ok(Self::File(PathBuf::from(path)));
        }
        for scheme in UriScheme::ALL {
            if let Some(rest) = s.strip_prefix(scheme.prefix())
                && !rest.is_empty()
                && !rest.contains(char::is_whitespace)
            {
                return Ok(Self::Uri {
                    scheme,
                    rest: rest.to_string(),
                });
            }
        }
        if !s.is_empty() && !s.starts_with('-') && s.chars().all(is_rule_name_char) {
            return Ok(Self::Bare(s.to_string()));
        }
        Err(RuleRefError(s.to_string()))
    }
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(name) => f.write_str(name),
            Self::File(path) => write!(f, "{FILE_PREFIX}{}", path.display()),
            Self::Uri { scheme, rest } => write!(f, "{}{}", scheme.prefix(), rest),
        }
    }
}

/// Characters a bare rule name is made of. A colon always starts a `file:` or scheme reference.
pub fn is_rule_name_char(c: char) -> bool {
    !c.is_whitespace() && c != ':'
}

/// A rule reference: a bare catalog name, `file:` plus a path, or a scheme URI.
/// Alternatives rank in that order.
pub fn rule_grammar() -> Grammar {
    let schemes = UriScheme::ALL
        .iter()
        .map(|scheme| literal(scheme.prefix()))
        .collect();

    labeled(
        "a recognized rule reference",
        one_of(vec![
            Grammar::Dynamic {
                kind: LeafKind::RuleName,
                lexeme: Lexeme::Identifier,
            },
            concat(seq(vec![literal(FILE_PREFIX), path_grammar()])),
            concat(seq(vec![one_of(schemes), not_quoted()])),
        ]),
    )
}

/// `name -- description`, with the name padded to `name_width` so descriptions line up.
pub fn describe(rule: &RuleInfo, name_width: usize) -> String {
    if rule.description.is_empty() {
        rule.name.clone()
    } else {
        format!(
            "{:<name_width$}{DESCRIPTION_SEPARATOR}{}",
            rule.name, rule.description
        )
    }
}

/// Catalog names starting with `typed`, in catalog order.
pub fn complete_rule_name(typed: &str, ctx: &CompletionContext<'_>) -> CompletionResult {
    let matching: Vec<RuleInfo> = ctx
        .catalog
        .rules()
        .into_iter()
        .filter(|rule| rule.name.starts_with(typed))
        .collect();
    let name_width = matching
        .iter()
        .map(|rule| rule.name.chars().count())
        .max()
        .unwrap_or(0);
    log::trace!("{} catalog rules match '{}'", matching.len(), typed);

    CompletionResult::strict(matching.iter().map(|rule| {
        let append = rule.name.get(typed.len()..).unwrap_or_default();
        Token::new(describe(rule, name_width), append)
    }))
}
