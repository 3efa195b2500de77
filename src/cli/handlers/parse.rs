// src/cli/handlers/parse.rs

use crate::{
    cli::{args::ParseArgs, handlers::commons},
    core::assembler::CommandGrammar,
};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// The main handler for the `parse` command.
/// Prints the flattened argument words (grouped into flag/value arguments with `--json`),
/// or the line with a caret under the first error.
pub fn handle(args: Vec<String>) -> Result<()> {
    let parse_args = ParseArgs::try_parse_from(&args)?;
    let session = commons::Session::open(parse_args.grammar.cwd.as_deref())?;
    let grammar = CommandGrammar::new(parse_args.grammar.compat);

    let words = match grammar.parse(&parse_args.line, &session.ctx()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{}", commons::render_diagnostic(&parse_args.line, &e).yellow());
            return Err(e.into());
        }
    };

    if parse_args.grammar.json {
        println!("{}", serde_json::to_string_pretty(&grammar.arguments(words))?);
    } else {
        for word in &words {
            println!("{word}");
        }
    }
    Ok(())
}
