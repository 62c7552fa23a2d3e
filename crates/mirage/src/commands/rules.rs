//! Conflict rule commands

use anyhow::{anyhow, Result};
use mirage_core::ConflictRule;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};

use super::CommandContext;
use crate::cli::{RulesCommands, RulesListArgs, RulesShowArgs};
use crate::output;

pub fn run(cmd: RulesCommands, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        RulesCommands::List(args) => list(args, ctx),
        RulesCommands::Show(args) => show(args, ctx),
    }
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Extension")]
    name: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Conflicts With")]
    conflicts: String,
    #[tabled(rename = "Preferred")]
    preferred: String,
}

impl RuleRow {
    fn new(name: &str, rule: &ConflictRule) -> Self {
        Self {
            name: name.to_string(),
            severity: rule.severity.to_string(),
            category: rule.category.to_string(),
            conflicts: rule
                .conflicts
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            preferred: rule.preferred_choice.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Serialize)]
struct NamedRule<'a> {
    name: &'a str,
    #[serde(flatten)]
    rule: &'a ConflictRule,
}

fn list(args: RulesListArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let registry = ctx.rule_registry()?;

    if ctx.wants_json(args.json) {
        let rules: Vec<NamedRule<'_>> = registry
            .iter()
            .map(|(name, rule)| NamedRule { name, rule })
            .collect();
        output::json(&rules)?;
        return Ok(ExitCode::SUCCESS);
    }

    if registry.is_empty() {
        output::warning("No conflict rules loaded");
        return Ok(ExitCode::SUCCESS);
    }

    let rows: Vec<RuleRow> = registry
        .iter()
        .map(|(name, rule)| RuleRow::new(name, rule))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    output::info(&format!("{} rules", registry.len()));

    Ok(ExitCode::SUCCESS)
}

fn show(args: RulesShowArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let registry = ctx.rule_registry()?;
    let rule = registry
        .rule_for(&args.name)
        .ok_or_else(|| anyhow!("No conflict rule declared for '{}'", args.name))?;

    if ctx.wants_json(args.json) {
        output::json(&NamedRule {
            name: &args.name,
            rule,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    output::header(&args.name);
    output::kv("Severity", &output::severity(rule.severity));
    output::kv("Category", &rule.category.to_string());
    output::kv("Reason", &rule.reason);
    if !rule.impact.is_empty() {
        output::kv("Impact", &rule.impact);
    }
    output::kv(
        "Preferred",
        rule.preferred_choice.as_deref().unwrap_or("none (manual choice)"),
    );
    output::kv("Conflicts with", "");
    for name in &rule.conflicts {
        output::bullet(name);
    }
    if !rule.tips.is_empty() {
        output::kv("Tips", "");
        for tip in &rule.tips {
            output::bullet(tip);
        }
    }

    Ok(ExitCode::SUCCESS)
}
