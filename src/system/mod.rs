//! # System Interaction Layer
//!
//! The boundary between the grammar and the machine it runs on.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns short-lived helper processes and captures their output.
//! - **`git`**: The git-backed [`VcsProvider`](crate::core::vcs_grammar::VcsProvider),
//!   which feeds commit and ref completion.
//! - **`terminal`**: Queries the width available for completion displays.

pub mod executor;
pub mod git;
pub mod terminal;
