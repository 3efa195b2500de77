// src/core/mod.rs

pub mod assembler;
pub mod catalog;
pub mod combinators;
pub mod config_loader;
pub mod context;
pub mod flags;
pub mod grammar;
pub mod path_grammar;
pub mod paths;
pub mod rule_grammar;
pub mod vcs_grammar;

#[cfg(test)]
pub(crate) mod testing;
