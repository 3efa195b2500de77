// src/cli/mod.rs

use clap::Parser;

pub mod args;
pub mod handlers;

/// fixline: argument grammar and tab-completion for the rewrite tool's command line.
///
/// Commands: `complete`, `parse` and `rules`. Pass the command line being
/// edited as a single argument, after `--` when it starts with a dash.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The command to run.
    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Arguments for the command. Parsed by the command's own handler.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
