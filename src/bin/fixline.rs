// src/bin/fixline.rs

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser};
use colored::*;
use fixline::{
    cli::{Cli, handlers},
    core::grammar::GrammarError,
};

// --- Command Definition and Registry ---

/// A command of the binary, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// Every command of the binary. To add a command, add an entry to this table.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "complete",
        aliases: &["c"],
        handler: handlers::complete::handle,
    },
    CommandDefinition {
        name: "parse",
        aliases: &["p"],
        handler: handlers::parse::handle,
    },
    CommandDefinition {
        name: "rules",
        aliases: &["ls"],
        handler: handlers::rules::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Sets up logging, dispatches to the handler and turns errors into exit codes:
/// 2 when the line did not parse, 1 for anything else.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        let code = if e.downcast_ref::<GrammarError>().is_some() { 2 } else { 1 };
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(code);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(name) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match find_command(&name) {
        Some(command) => (command.handler)(cli.args),
        None => {
            let known: Vec<&str> = COMMAND_REGISTRY.iter().map(|cmd| cmd.name).collect();
            Err(anyhow!(
                "Unknown command '{}'. Expected one of: {}",
                name,
                known.join(", ")
            ))
        }
    }
}
