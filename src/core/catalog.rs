// src/core/catalog.rs

use crate::models::RuleInfo;
use std::fmt;

/// Read-only source of known rule names and their descriptions.
pub trait RuleCatalog: fmt::Debug {
    /// All known rules, in presentation order.
    fn rules(&self) -> Vec<RuleInfo>;
}

/// The rules that ship with the rewrite tool.
pub static BUILTIN_RULES: &[(&str, &str)] = &[
    (
        "DisableSyntax",
        "Reports an error for disabled features such as var or XML literals.",
    ),
    (
        "ExplicitResultTypes",
        "Inserts type annotations for inferred public members.",
    ),
    (
        "LeakingImplicitClassVal",
        "Adds 'private' to val parameters of implicit value classes.",
    ),
    (
        "NoAutoTupling",
        "Inserts explicit tuples for adapted argument lists.",
    ),
    (
        "NoValInForComprehension",
        "Removes deprecated val inside for-comprehension binders.",
    ),
    (
        "OrganizeImports",
        "Sorts, groups and removes unused import statements.",
    ),
    (
        "ProcedureSyntax",
        "Replaces deprecated procedure syntax with explicit ': Unit ='.",
    ),
    (
        "RedundantSyntax",
        "Removes redundant syntax such as `final` modifiers on an object.",
    ),
    (
        "RemoveUnused",
        "Removes unused imports and terms reported by the compiler.",
    ),
];

/// A catalog backed by an in-memory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    rules: Vec<RuleInfo>,
}

impl StaticCatalog {
    pub fn new(rules: Vec<RuleInfo>) -> Self {
        Self { rules }
    }

    /// The built-in rules.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_RULES
                .iter()
                .map(|(name, description)| RuleInfo::new(*name, *description))
                .collect(),
        )
    }

    /// Appends user-configured rules. A configured rule with a built-in name replaces its description.
    pub fn with_extra(mut self, extra: Vec<RuleInfo>) -> Self {
        for rule in extra {
            match self.rules.iter_mut().find(|known| known.name == rule.name) {
                Some(known) => {
                    log::debug!("Configured rule '{}' overrides a built-in description.", rule.name);
                    known.description = rule.description;
                }
                None => self.rules.push(rule),
            }
        }
        self
    }
}

impl RuleCatalog for StaticCatalog {
    fn rules(&self) -> Vec<RuleInfo> {
        self.rules.clone()
    }
}
