// src/cli/args.rs
use clap::{Args, Parser};
use std::path::PathBuf;

/// Options shared by every command that evaluates a line.
#[derive(Args, Debug, Default)]
pub struct GrammarArgs {
    /// Use the legacy grammar, which accepts only a list of rule references.
    #[arg(long)]
    pub compat: bool,

    /// Directory relative paths are resolved against. Defaults to the current directory.
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints the completion candidates for the token under the cursor."
)]
pub struct CompleteArgs {
    #[command(flatten)]
    pub grammar: GrammarArgs,

    /// Byte offset of the cursor in LINE. Defaults to the end of the line.
    #[arg(long)]
    pub cursor: Option<usize>,

    /// The command line being edited.
    #[arg(allow_hyphen_values = true, default_value = "")]
    pub line: String,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Parses a complete command line into its argument words."
)]
pub struct ParseArgs {
    #[command(flatten)]
    pub grammar: GrammarArgs,

    /// The command line to parse.
    #[arg(allow_hyphen_values = true, default_value = "")]
    pub line: String,
}

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Lists the rules offered for completion."
)]
pub struct RulesArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}
