//! Extension commands
//!
//! - check: find conflicts among a profile's enabled extensions and,
//!   optionally, apply the auto-resolutions
//! - compat: pre-flight check for enabling one extension

use anyhow::{Context, Result};
use mirage_core::{Conflict, Extension};
use mirage_extensions::{
    get_auto_resolution, CompatibilityValidator, ConflictDetector, MemoryResolutionStore,
    Resolution, ResolutionRecord, ResolutionStore,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use super::{exit_code, read_profile, write_profile, CommandContext};
use crate::cli::{ExtensionCheckArgs, ExtensionCommands, ExtensionCompatArgs};
use crate::output;

/// Main entry point for extension subcommands
pub fn run(cmd: ExtensionCommands, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        ExtensionCommands::Check(args) => check(args, ctx),
        ExtensionCommands::Compat(args) => compat(args, ctx),
    }
}

// ============================================================================
// Check Command
// ============================================================================

#[derive(Tabled)]
struct ConflictRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Extension")]
    extension: String,
    #[tabled(rename = "Conflicts With")]
    conflicts_with: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl From<&Conflict> for ConflictRow {
    fn from(conflict: &Conflict) -> Self {
        Self {
            severity: conflict.severity.to_string(),
            extension: conflict.extension.clone(),
            conflicts_with: conflict.conflicts_with.join(", "),
            category: conflict.category.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictEntry {
    #[serde(flatten)]
    conflict: Conflict,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_resolution: Option<Resolution>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    conflicts: Vec<ConflictEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<ResolveSummary>,
}

/// Result of applying every available auto-resolution
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveSummary {
    applied: Vec<ResolutionRecord>,
    remaining: Vec<Conflict>,
    extensions: Vec<Extension>,
    auto_resolution_rate: f64,
}

fn check(args: ExtensionCheckArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let mut profile = read_profile(&args.file)?;
    let extensions = profile
        .extensions()
        .with_context(|| format!("Invalid extensions list in {}", args.file))?;

    let registry = ctx.rule_registry()?;
    let detector = ConflictDetector::new(&registry);
    let conflicts = detector.check_conflicts(&extensions);

    let summary = if args.resolve {
        Some(resolve_all(&detector, &extensions)?)
    } else {
        None
    };

    if let (Some(path), Some(summary)) = (&args.output, &summary) {
        profile.set_extensions(&summary.extensions)?;
        write_profile(path, &profile)?;
    }

    let ok = match &summary {
        Some(summary) => summary.remaining.is_empty(),
        None => conflicts.is_empty(),
    };

    if ctx.wants_json(args.json) {
        let report = CheckReport {
            conflicts: conflicts
                .into_iter()
                .map(|conflict| ConflictEntry {
                    auto_resolution: get_auto_resolution(&conflict),
                    conflict,
                })
                .collect(),
            resolution: summary,
        };
        output::json(&report)?;
    } else {
        print_conflicts(&conflicts, ctx.config.display.show_auto_resolutions);
        if let Some(summary) = &summary {
            print_summary(summary);
        }
        if let Some(path) = &args.output {
            output::info(&format!("Wrote resolved profile to {}", path));
        }
    }

    Ok(exit_code(ok))
}

/// Apply auto-resolutions in severity order
///
/// Conflicts are re-detected before each step, since an earlier fix may
/// already have cleared a later one.
fn resolve_all(detector: &ConflictDetector<'_>, extensions: &[Extension]) -> Result<ResolveSummary> {
    let mut current = extensions.to_vec();
    let mut store = MemoryResolutionStore::new();

    for original in detector.check_conflicts(extensions) {
        let Some(active) = detector
            .check_conflicts(&current)
            .into_iter()
            .find(|c| c.extension == original.extension)
        else {
            continue;
        };

        if let Some(resolution) = get_auto_resolution(&active) {
            info!("Auto-resolving {}: {}", active.extension, resolution);
            current = resolution.apply(&current);
            store.save_resolution(&active, &resolution)?;
        }
    }

    Ok(ResolveSummary {
        applied: store.resolution_history()?,
        remaining: detector.check_conflicts(&current),
        auto_resolution_rate: store.auto_resolution_rate()?,
        extensions: current,
    })
}

fn print_conflicts(conflicts: &[Conflict], show_auto_resolutions: bool) {
    if conflicts.is_empty() {
        output::success("No extension conflicts");
        return;
    }

    output::header(&format!("{} extension conflict(s)", conflicts.len()));
    let rows: Vec<ConflictRow> = conflicts.iter().map(ConflictRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    for conflict in conflicts {
        println!();
        println!(
            "{} [{}]",
            conflict.extension,
            output::severity(conflict.severity)
        );
        output::kv("Reason", &conflict.reason);
        if !conflict.impact.is_empty() {
            output::kv("Impact", &conflict.impact);
        }
        for tip in &conflict.tips {
            output::bullet(tip);
        }
        if show_auto_resolutions {
            match get_auto_resolution(conflict) {
                Some(resolution) => output::kv("Suggested", &resolution.to_string()),
                None => output::kv("Suggested", "no automatic fix, choose one to disable"),
            }
        }
    }
}

fn print_summary(summary: &ResolveSummary) {
    output::header("Auto-resolution");
    if summary.applied.is_empty() {
        output::info("No conflict has an automatic fix");
    }
    for record in &summary.applied {
        output::success(&format!("{}: {}", record.conflict.extension, record.resolution));
    }

    if summary.remaining.is_empty() {
        output::success("All conflicts resolved");
    } else {
        for conflict in &summary.remaining {
            output::warning(&format!(
                "Still conflicting: {} with {}",
                conflict.extension,
                conflict.conflicts_with.join(", ")
            ));
        }
    }
}

// ============================================================================
// Compat Command
// ============================================================================

fn compat(args: ExtensionCompatArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let profile = read_profile(&args.file)?;
    let extensions = profile
        .extensions()
        .with_context(|| format!("Invalid extensions list in {}", args.file))?;

    let registry = ctx.rule_registry()?;
    let candidate = candidate_for(&extensions, &args.name);
    let report = CompatibilityValidator::new(&registry).validate(&extensions, &candidate);

    if ctx.wants_json(args.json) {
        output::json(&report)?;
    } else if report.is_valid {
        output::success(&format!("{} can be enabled", args.name));
    } else {
        output::error(&format!(
            "{} conflicts with {}",
            args.name,
            report.conflicts.join(", ")
        ));
        if let Some(reason) = &report.reason {
            output::kv("Reason", reason);
        }
    }

    Ok(exit_code(report.is_valid))
}

/// Existing entry with this name, or a new one
fn candidate_for(extensions: &[Extension], name: &str) -> Extension {
    extensions
        .iter()
        .find(|ext| ext.name == name)
        .cloned()
        .unwrap_or_else(|| Extension::new(name.to_lowercase().replace(' ', "-"), name, ""))
}
