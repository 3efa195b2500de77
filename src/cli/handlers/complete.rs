// src/cli/handlers/complete.rs

use crate::{
    cli::{args::CompleteArgs, handlers::commons},
    core::assembler::CommandGrammar,
    models::CompletionResult,
};
use anyhow::Result;
use clap::Parser;

/// The main handler for the `complete` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let complete_args = CompleteArgs::try_parse_from(&args)?;
    let session = commons::Session::open(complete_args.grammar.cwd.as_deref())?;
    let grammar = CommandGrammar::new(complete_args.grammar.compat);

    let line = &complete_args.line;
    let cursor = complete_args.cursor.unwrap_or(line.len());
    log::debug!("Completing {:?} at {} ({:?} mode)", line, cursor, grammar.mode());

    let result = grammar.complete(line, cursor, &session.ctx())?;
    if complete_args.grammar.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_candidates(&result));
    }
    Ok(())
}

/// One `append<TAB>display` line per candidate. An unconstrained result renders as nothing.
pub fn render_candidates(result: &CompletionResult) -> String {
    result
        .tokens()
        .iter()
        .map(|token| format!("{}\t{}\n", token.append, token.display))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Token;

    #[test]
    fn test_candidates_render_append_then_display() {
        let result = CompletionResult::strict([
            Token::new("--diff", "ff"),
            Token::new("--diff-base", "ff-base"),
        ]);
        assert_eq!(render_candidates(&result), "ff\t--diff\nff-base\t--diff-base\n");
    }

    #[test]
    fn test_unconstrained_renders_nothing() {
        assert_eq!(render_candidates(&CompletionResult::unconstrained()), "");
    }
}
