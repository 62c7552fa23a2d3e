//! Profile commands
//!
//! - validate: upgrade a profile and run its business rules
//! - upgrade: migrate a profile to the current schema version

use anyhow::{Context, Result};
use mirage_core::{validate_and_upgrade, validate_profile, Profile, CURRENT_VERSION};
use std::process::ExitCode;

use super::{exit_code, read_profile, write_profile, CommandContext};
use crate::cli::{ProfileCommands, ProfileUpgradeArgs, ProfileValidateArgs};
use crate::output;

/// Main entry point for profile subcommands
pub fn run(cmd: ProfileCommands, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        ProfileCommands::Validate(args) => validate(args, ctx),
        ProfileCommands::Upgrade(args) => upgrade(args),
    }
}

fn validate(args: ProfileValidateArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let profile = read_profile(&args.file)?;
    let outcome = validate_profile(&profile)
        .with_context(|| format!("Cannot validate {}", args.file))?;

    if ctx.wants_json(args.json) {
        output::json(&outcome)?;
    } else {
        output::header(&format!("Profile {}", args.file));
        print_summary(&outcome.profile, version_label(&profile));

        if outcome.is_valid {
            output::success("Profile is valid");
        } else {
            for error in &outcome.errors {
                output::error(error);
            }
        }
    }

    Ok(exit_code(outcome.is_valid))
}

fn upgrade(args: ProfileUpgradeArgs) -> Result<ExitCode> {
    let profile = read_profile(&args.file)?;
    let from = version_label(&profile);
    let outcome = validate_and_upgrade(&profile)
        .with_context(|| format!("Cannot upgrade {}", args.file))?;

    match &args.output {
        Some(path) => {
            write_profile(path, &outcome.profile)?;
            output::success(&format!(
                "Upgraded {} from version {} to {} -> {}",
                args.file, from, CURRENT_VERSION, path
            ));
        }
        None => println!("{}", outcome.profile.to_json_pretty()?),
    }

    // Schema problems do not block the upgrade itself
    for error in &outcome.errors {
        output::warning(error);
    }

    Ok(exit_code(outcome.is_valid))
}

fn print_summary(profile: &Profile, from: String) {
    output::kv("Name", profile.name().unwrap_or("-"));
    output::kv("OS", profile.os().unwrap_or("-"));
    output::kv("ID", profile.id().unwrap_or("-"));
    output::kv("Version", &format!("{} -> {}", from, CURRENT_VERSION));
}

/// Declared version as shown to the user
fn version_label(profile: &Profile) -> String {
    match profile.raw_version() {
        Some(version) => version.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(&Profile::new()), "none");
        assert_eq!(version_label(&Profile::new().with("version", json!(1))), "1");
        assert_eq!(version_label(&Profile::new().with("version", json!(null))), "none");
    }
}
