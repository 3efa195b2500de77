// src/cli/handlers/mod.rs

// One module per command of the binary.

pub mod commons;
pub mod complete;
pub mod parse;
pub mod rules;
