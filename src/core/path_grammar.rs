// src/core/path_grammar.rs

//! # Path Grammar
//!
//! Paths are resolved lexically: relative input is joined onto the working
//! directory and `.`/`..` segments are collapsed without touching the
//! filesystem. Completion derives a [`PathState`] from the full typed text on
//! every request and lists the anchor directory, so moving up with `..` or
//! jumping to an absolute path needs no bookkeeping.

use crate::{
    constants::PATH_LIST_SEPARATORS,
    core::{
        combinators::joined_repeat,
        context::CompletionContext,
        grammar::{Grammar, LeafKind, Lexeme},
        paths,
    },
    models::{CompletionResult, Token},
};
use std::{
    fs,
    path::{Component, Path, PathBuf, is_separator},
};

/// What a path token produces once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathValue {
    /// The normalized absolute path.
    Absolute,
    /// The text exactly as typed (after unquoting).
    AsTyped,
}

/// A completion-enabled path whose value is the normalized absolute path.
pub fn path_grammar() -> Grammar {
    path_token(PathValue::Absolute, &[])
}

/// A completion-enabled path whose value is kept as typed.
pub fn raw_path_grammar() -> Grammar {
    path_token(PathValue::AsTyped, &[])
}

/// A classpath-style list of absolute paths separated by `:` or `;`.
pub fn path_list_grammar() -> Grammar {
    joined_repeat(
        path_token(PathValue::Absolute, PATH_LIST_SEPARATORS),
        PATH_LIST_SEPARATORS,
    )
}

fn path_token(value: PathValue, stops: &'static [char]) -> Grammar {
    Grammar::Dynamic {
        kind: LeafKind::Path(value),
        lexeme: Lexeme::Quotable { stops },
    }
}

/// Collapses `.` and `..` segments without consulting the filesystem.
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
        }
    }
    normalized
}

/// Resolves typed text to a normalized absolute path.
pub fn resolve(typed: &str, cwd: &Path) -> PathBuf {
    let expanded = paths::expand_user_path(typed);
    let candidate = Path::new(expanded.as_ref());
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        cwd.join(candidate)
    };
    dunce::simplified(&normalize(&joined)).to_path_buf()
}

/// The directory a completion request lists, and the part of the last segment already typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    pub anchor: PathBuf,
    pub prefix: String,
}

impl PathState {
    /// Splits the typed text at its last separator. Everything up to and
    /// including the separator picks the anchor; the remainder is the prefix.
    /// With no separator the anchor is the working directory.
    pub fn derive(typed: &str, cwd: &Path) -> Self {
        match typed.rfind(is_separator) {
            Some(index) => {
                let split = index + 1;
                let head = typed.get(..split).unwrap_or_default();
                let tail = typed.get(split..).unwrap_or_default();
                Self {
                    anchor: resolve(head, cwd),
                    prefix: tail.to_string(),
                }
            }
            None => Self {
                anchor: resolve("", cwd),
                prefix: typed.to_string(),
            },
        }
    }

    /// Entries of the anchor whose name starts with the prefix, sorted by name.
    /// An unreadable or missing anchor yields no candidates.
    pub fn candidates(&self) -> Vec<Token> {
        let entries = match fs::read_dir(&self.anchor) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot list '{}': {}", self.anchor.display(), e);
                return Vec::new();
            }
        };

        let mut matches: Vec<(String, bool)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
                name.starts_with(&self.prefix).then_some((name, is_dir))
            })
            .collect();
        matches.sort();

        matches
            .into_iter()
            .map(|(name, is_dir)| {
                let append = name.get(self.prefix.len()..).unwrap_or_default().to_string();
                let display = if is_dir { format!("{name}/") } else { name };
                Token::new(display, append)
            })
            .collect()
    }
}

/// Completion function of every path token.
pub fn complete(typed: &str, ctx: &CompletionContext<'_>) -> CompletionResult {
    let state = PathState::derive(typed, ctx.cwd);
    log::debug!(
        "Path completion for '{}': anchor '{}', prefix '{}'",
        typed,
        state.anchor.display(),
        state.prefix
    );
    CompletionResult::strict(state.candidates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::TestEnv;
    use std::fs::File;
    use tempfile::tempdir;

    fn appends(result: &CompletionResult) -> Vec<&str> {
        result.tokens().iter().map(|t| t.append.as_str()).collect()
    }

    #[test]
    fn test_resolve_relative_against_cwd() {
        let cwd = Path::new("/home/u");
        assert_eq!(resolve("a/b", cwd), PathBuf::from("/home/u/a/b"));
    }

    #[test]
    fn test_resolve_absolute_is_unchanged() {
        assert_eq!(resolve("/x/y", Path::new("/home/u")), PathBuf::from("/x/y"));
    }

    #[test]
    fn test_resolve_collapses_parent_segments() {
        let resolved = resolve("../c", Path::new("/home/u"));
        assert_eq!(resolved, PathBuf::from("/home/c"));
        assert!(!resolved.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../../etc/./x/..")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_derive_state_re_roots_on_absolute_and_dot_paths() {
        let cwd = Path::new("/home/u");
        assert_eq!(
            PathState::derive("src/ma", cwd),
            PathState {
                anchor: PathBuf::from("/home/u/src"),
                prefix: "ma".to_string()
            }
        );
        assert_eq!(
            PathState::derive("/etc/", cwd),
            PathState {
                anchor: PathBuf::from("/etc"),
                prefix: String::new()
            }
        );
        assert_eq!(
            PathState::derive("../../tmp/x", cwd),
            PathState {
                anchor: PathBuf::from("/tmp"),
                prefix: "x".to_string()
            }
        );
        assert_eq!(
            PathState::derive("", cwd),
            PathState {
                anchor: PathBuf::from("/home/u"),
                prefix: String::new()
            }
        );
    }

    #[test]
    fn test_trailing_separator_lists_whole_directory() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("passwd")).unwrap();
        File::create(dir.path().join("hosts")).unwrap();
        fs::create_dir(dir.path().join("pam.d")).unwrap();

        let env = TestEnv::new();
        let typed = format!("{}/", dir.path().display());
        let result = complete(&typed, &env.ctx());
        assert_eq!(appends(&result), vec!["hosts", "pam.d", "passwd"]);
        assert_eq!(result.tokens()[1].display, "pam.d/");
    }

    #[test]
    fn test_partial_segment_appends_only_the_suffix() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("passwd")).unwrap();
        File::create(dir.path().join("passwd-")).unwrap();
        File::create(dir.path().join("hosts")).unwrap();

        let env = TestEnv::new();
        let typed = format!("{}/pas", dir.path().display());
        let result = complete(&typed, &env.ctx());
        assert_eq!(appends(&result), vec!["swd", "swd-"]);
    }

    #[test]
    fn test_completion_recomputes_from_full_text() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/inner")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();

        let env = TestEnv::new().with_cwd(dir.path());
        assert_eq!(appends(&complete("a/", &env.ctx())), vec!["inner"]);
        assert_eq!(appends(&complete("a/../b", &env.ctx())), vec![".txt"]);
        assert_eq!(appends(&complete("a/inner/../../", &env.ctx())), vec!["a", "b.txt"]);
    }

    #[test]
    fn test_missing_anchor_degrades_to_no_candidates() {
        let env = TestEnv::new();
        let result = complete("/definitely/not/a/real/dir/x", &env.ctx());
        assert_eq!(result, CompletionResult::Strict(Vec::new()));
    }

    #[test]
    fn test_path_value_is_absolute_even_when_typed_relative() {
        let env = TestEnv::new();
        assert_eq!(path_grammar().parse("a/./b/../c", &env.ctx()).unwrap(), vec!["/home/u/a/c"]);
        assert_eq!(raw_path_grammar().parse("a/./b", &env.ctx()).unwrap(), vec!["a/./b"]);
    }

    #[test]
    fn test_path_list_resolves_each_entry() {
        let env = TestEnv::new();
        assert_eq!(
            path_list_grammar().parse("lib/a.jar;/opt/b.jar", &env.ctx()).unwrap(),
            vec!["/home/u/lib/a.jar:/opt/b.jar"]
        );
    }

    #[test]
    fn test_path_list_completes_after_separator() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("one.jar")).unwrap();
        let env = TestEnv::new().with_cwd(dir.path());
        let result = path_list_grammar().complete("x.jar:o", 7, &env.ctx()).unwrap();
        assert_eq!(appends(&result), vec!["ne.jar"]);
    }
}
