// src/core/flags.rs

use crate::core::{
    combinators::{key_value, key_value_with_short, labeled, literal, map_or_fail, one_of, switch_with_short},
    grammar::Grammar,
    path_grammar::{path_grammar, path_list_grammar, raw_path_grammar},
    rule_grammar::rule_grammar,
    vcs_grammar::vcs_grammar,
};
use regex::Regex;

// --- Flag Definition and Registry ---

/// The grammar that follows a flag taking a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    /// `:`/`;`-separated list of paths.
    PathList,
    Path,
    VcsRef,
    /// A path-like pattern that must compile as a regular expression.
    Pattern,
    Rule,
}

impl FlagValue {
    pub fn grammar(self) -> Grammar {
        match self {
            Self::PathList => path_list_grammar(),
            Self::Path => path_grammar(),
            Self::VcsRef => vcs_grammar(),
            Self::Pattern => map_or_fail(raw_path_grammar(), compile_pattern),
            Self::Rule => rule_grammar(),
        }
    }
}

/// A recognized flag. `short` is accepted on input but never suggested.
#[derive(Debug)]
pub struct FlagDefinition {
    pub long: &'static str,
    pub short: Option<&'static str>,
    pub value: Option<FlagValue>,
}

impl FlagDefinition {
    pub fn grammar(&self) -> Grammar {
        match (self.short, self.value) {
            (None, None) => literal(self.long),
            (Some(short), None) => switch_with_short(self.long, short),
            (None, Some(value)) => key_value(self.long, value.grammar()),
            (Some(short), Some(value)) => key_value_with_short(self.long, short, value.grammar()),
        }
    }
}

const fn switch(long: &'static str) -> FlagDefinition {
    FlagDefinition {
        long,
        short: None,
        value: None,
    }
}

const fn valued(long: &'static str, value: FlagValue) -> FlagDefinition {
    FlagDefinition {
        long,
        short: None,
        value: Some(value),
    }
}

/// Every flag the rewrite tool accepts.
/// To add a flag, add an entry to this table.
pub static FLAG_REGISTRY: &[FlagDefinition] = &[
    valued("--classpath", FlagValue::PathList),
    switch("--auto-classpath"),
    FlagDefinition {
        long: "--config",
        short: Some("-c"),
        value: Some(FlagValue::Path),
    },
    switch("--diff"),
    valued("--diff-base", FlagValue::VcsRef),
    valued("--exclude", FlagValue::Pattern),
    FlagDefinition {
        long: "--files",
        short: Some("-f"),
        value: Some(FlagValue::Path),
    },
    switch("--non-interactive"),
    valued("--out-from", FlagValue::Pattern),
    valued("--out-to", FlagValue::Pattern),
    FlagDefinition {
        long: "--rules",
        short: Some("-r"),
        value: Some(FlagValue::Rule),
    },
    valued("--sourceroot", FlagValue::Path),
    switch("--stdout"),
    switch("--test"),
    valued("--tool-classpath", FlagValue::PathList),
    switch("--help"),
    FlagDefinition {
        long: "--version",
        short: Some("-v"),
        value: None,
    },
    switch("--verbose"),
];

/// Finds a flag definition by its long or short spelling.
pub fn find_flag(name: &str) -> Option<&'static FlagDefinition> {
    FLAG_REGISTRY
        .iter()
        .find(|flag| flag.long == name || flag.short == Some(name))
}

/// Any single flag from the registry, with its value if it takes one.
pub fn flag_grammar() -> Grammar {
    labeled(
        "a flag",
        one_of(FLAG_REGISTRY.iter().map(FlagDefinition::grammar).collect()),
    )
}

fn compile_pattern(text: &str) -> Result<String, String> {
    Regex::new(text)
        .map(|_| text.to_string())
        .map_err(|e| format!("'{text}' is not a valid regular expression: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{grammar::GrammarError, testing::TestEnv};

    #[test]
    fn test_every_long_flag_is_suggested_on_empty_prefix() {
        let env = TestEnv::new();
        let result = flag_grammar().complete("", 0, &env.ctx()).unwrap();
        let displays: Vec<_> = result.tokens().iter().map(|t| t.display.as_str()).collect();
        for flag in FLAG_REGISTRY {
            assert!(displays.contains(&flag.long), "missing {}", flag.long);
        }
        assert_eq!(displays.len(), FLAG_REGISTRY.len());
    }

    #[test]
    fn test_short_flags_are_never_suggested() {
        let env = TestEnv::new();
        for prefix in ["", "-"] {
            let result = flag_grammar().complete(prefix, prefix.len(), &env.ctx()).unwrap();
            for token in result.tokens() {
                assert!(token.display.starts_with("--"), "short form offered: {}", token.display);
            }
        }
    }

    #[test]
    fn test_short_version_parses_as_long_switch() {
        let env = TestEnv::new();
        assert_eq!(flag_grammar().parse("-v", &env.ctx()).unwrap(), vec!["--version"]);
    }

    #[test]
    fn test_short_config_takes_a_path() {
        let env = TestEnv::new();
        assert_eq!(
            flag_grammar().parse("-c conf/fix.conf", &env.ctx()).unwrap(),
            vec!["--config", "/home/u/conf/fix.conf"]
        );
    }

    #[test]
    fn test_exclude_accepts_valid_pattern_as_typed() {
        let env = TestEnv::new();
        assert_eq!(
            flag_grammar().parse("--exclude foo.*", &env.ctx()).unwrap(),
            vec!["--exclude", "foo.*"]
        );
    }

    #[test]
    fn test_exclude_rejects_invalid_pattern() {
        let env = TestEnv::new();
        let err = flag_grammar().parse("--exclude [unterminated", &env.ctx()).unwrap_err();
        assert!(matches!(err, GrammarError::Validation { position: 10, .. }), "{err:?}");
        assert!(err.to_string().contains("not a valid regular expression"));
    }

    #[test]
    fn test_diff_prefix_offers_both_diff_flags() {
        let env = TestEnv::new();
        let result = flag_grammar().complete("--diff", 6, &env.ctx()).unwrap();
        let appends: Vec<_> = result.tokens().iter().map(|t| t.append.as_str()).collect();
        assert_eq!(appends, vec!["", "-base"]);
    }

    #[test]
    fn test_find_flag_by_either_spelling() {
        assert_eq!(find_flag("-r").map(|f| f.long), Some("--rules"));
        assert_eq!(find_flag("--stdout").map(|f| f.value), Some(None));
        assert!(find_flag("-x").is_none());
    }
}
