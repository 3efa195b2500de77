// src/cli/handlers/rules.rs

use crate::{
    cli::{args::RulesArgs, handlers::commons},
    core::{catalog::RuleCatalog, rule_grammar},
    models::RuleInfo,
};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// The main handler for the `rules` command.
/// Lists the built-in catalog followed by the rules added in the settings file.
pub fn handle(args: Vec<String>) -> Result<()> {
    let rules_args = RulesArgs::try_parse_from(&args)?;
    let session = commons::Session::open(None)?;
    let rules = session.catalog.rules();

    if rules_args.json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!("\n--- {} ({}) ---", "Rules".yellow(), rules.len());
    for line in render_catalog(&rules) {
        println!("  {line}");
    }
    Ok(())
}

/// `name -- description` lines with descriptions aligned on the longest name.
pub fn render_catalog(rules: &[RuleInfo]) -> Vec<String> {
    let name_width = rules
        .iter()
        .map(|rule| rule.name.chars().count())
        .max()
        .unwrap_or(0);
    rules
        .iter()
        .map(|rule| rule_grammar::describe(rule, name_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lines_are_aligned() {
        let rules = vec![
            RuleInfo::new("Short", "First."),
            RuleInfo::new("MuchLonger", "Second."),
            RuleInfo::new("Bare", ""),
        ];
        assert_eq!(
            render_catalog(&rules),
            vec!["Short      -- First.", "MuchLonger -- Second.", "Bare"]
        );
    }
}
