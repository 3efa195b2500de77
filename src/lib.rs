//! # fixline
//!
//! A context-sensitive grammar for the command line of a source rewriting tool,
//! used both to parse a finished line into argument words and to compute
//! tab-completion candidates for the token under the cursor.
//!
//! The grammar lives in [`core`]; [`system`] supplies the git history, directory
//! listings and terminal width that completion draws on.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
