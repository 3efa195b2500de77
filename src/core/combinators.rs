// src/core/combinators.rs

// Small constructors for the reusable fragments every command grammar is built from.

use crate::core::grammar::{Grammar, LeafKind, Lexeme, Validator};

/// One or more whitespace characters.
pub fn space() -> Grammar {
    Grammar::Space
}

/// Leading or trailing whitespace that may be absent.
pub fn opt_space() -> Grammar {
    optional(space())
}

/// A fixed token that produces itself.
pub fn literal(text: &'static str) -> Grammar {
    Grammar::Literal { text, value: text }
}

/// A fixed token that produces `value` instead of itself.
pub fn alias(text: &'static str, value: &'static str) -> Grammar {
    Grammar::Literal { text, value }
}

/// A bare or shell-quoted word with no completion.
pub fn string_literal() -> Grammar {
    Grammar::Dynamic {
        kind: LeafKind::Text,
        lexeme: Lexeme::Quotable { stops: &[] },
    }
}

/// Bare text up to the next whitespace with no completion.
pub fn not_quoted() -> Grammar {
    Grammar::Dynamic {
        kind: LeafKind::Text,
        lexeme: Lexeme::Unquoted,
    }
}

pub fn seq(parts: Vec<Grammar>) -> Grammar {
    Grammar::Seq(parts)
}

pub fn one_of(alternatives: Vec<Grammar>) -> Grammar {
    Grammar::Alt(alternatives)
}

pub fn many(item: Grammar) -> Grammar {
    Grammar::Many(Box::new(item))
}

pub fn optional(inner: Grammar) -> Grammar {
    Grammar::Optional(Box::new(inner))
}

/// `item (space item)*`
pub fn separated(item: Grammar) -> Grammar {
    seq(vec![item.clone(), many(seq(vec![space(), item]))])
}

/// `key`, whitespace, then `value`. Produces the key followed by the value's words.
pub fn key_value(key: &'static str, value: Grammar) -> Grammar {
    seq(vec![literal(key), space(), value])
}

/// Like [`key_value`], but `short` is also accepted as a spelling of `key`.
/// The short spelling parses as the long key and is never suggested.
pub fn key_value_with_short(key: &'static str, short: &'static str, value: Grammar) -> Grammar {
    seq(vec![switch_with_short(key, short), space(), value])
}

/// A bare switch with a hidden short spelling.
pub fn switch_with_short(key: &'static str, short: &'static str) -> Grammar {
    one_of(vec![literal(key), hidden(alias(short, key))])
}

/// `item (separator item)*`, re-joined with the first of `separators`.
pub fn joined_repeat(item: Grammar, separators: &'static [char]) -> Grammar {
    Grammar::Joined {
        item: Box::new(item),
        separators,
    }
}

/// Runs `validate` on every match of `inner`; an error becomes a parse failure at the value.
pub fn map_or_fail(inner: Grammar, validate: Validator) -> Grammar {
    Grammar::MapOrFail(Box::new(inner), validate)
}

/// Keeps the matching behavior of `inner` and drops its candidates.
pub fn hidden(inner: Grammar) -> Grammar {
    Grammar::Hidden(Box::new(inner))
}

/// Glues the words of `inner` into a single word, e.g. `file:` + `/abs/path`.
pub fn concat(inner: Grammar) -> Grammar {
    Grammar::Concat(Box::new(inner))
}

pub fn labeled(label: &'static str, inner: Grammar) -> Grammar {
    Grammar::Labeled(label, Box::new(inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::TestEnv;

    #[test]
    fn test_separated_accepts_any_amount_of_space() {
        let env = TestEnv::new();
        let grammar = separated(not_quoted());
        assert_eq!(grammar.parse("a  b\tc", &env.ctx()).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_short_key_parses_as_long_key() {
        let env = TestEnv::new();
        let grammar = key_value_with_short("--files", "-f", string_literal());
        assert_eq!(grammar.parse("-f src", &env.ctx()).unwrap(), vec!["--files", "src"]);
        assert_eq!(grammar.parse("--files src", &env.ctx()).unwrap(), vec!["--files", "src"]);
    }

    #[test]
    fn test_short_key_never_suggested() {
        let env = TestEnv::new();
        let grammar = switch_with_short("--version", "-v");
        let result = grammar.complete("", 0, &env.ctx()).unwrap();
        let displays: Vec<_> = result.tokens().iter().map(|t| t.display.as_str()).collect();
        assert_eq!(displays, vec!["--version"]);
    }

    #[test]
    fn test_concat_glues_words() {
        let env = TestEnv::new();
        let grammar = concat(seq(vec![literal("github:"), not_quoted()]));
        assert_eq!(grammar.parse("github:org/repo", &env.ctx()).unwrap(), vec!["github:org/repo"]);
    }
}
