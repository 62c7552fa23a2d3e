//! Config command

use anyhow::Result;
use std::process::ExitCode;

use super::CommandContext;
use crate::cli::{ConfigCommands, ConfigShowArgs};
use crate::output;

pub fn run(cmd: ConfigCommands, ctx: &CommandContext) -> Result<ExitCode> {
    match cmd {
        ConfigCommands::Show(args) => show(args, ctx),
    }
}

fn show(args: ConfigShowArgs, ctx: &CommandContext) -> Result<ExitCode> {
    let json = ctx.wants_json(args.json);
    if !json {
        output::kv("Config directory", ctx.config_dir.as_str());
    }
    println!("{}", render(ctx, json)?);

    Ok(ExitCode::SUCCESS)
}

/// Effective config as pretty JSON or YAML
fn render(ctx: &CommandContext, json: bool) -> Result<String> {
    Ok(if json {
        serde_json::to_string_pretty(&ctx.config)?
    } else {
        serde_yaml_ng::to_string(&ctx.config)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use mirage_core::{OutputFormat, RuntimeConfig};

    fn context(config: RuntimeConfig) -> CommandContext {
        CommandContext {
            config,
            config_dir: Utf8PathBuf::from("/nonexistent"),
        }
    }

    #[test]
    fn test_show_follows_configured_output_format() {
        let mut config = RuntimeConfig::default();
        config.display.output_format = OutputFormat::Json;
        let ctx = context(config);

        let json = ctx.wants_json(false);
        assert!(json);

        let rendered = render(&ctx, json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(parsed.get("display").is_some());
    }

    #[test]
    fn test_show_defaults_to_yaml() {
        let ctx = context(RuntimeConfig::default());

        let json = ctx.wants_json(false);
        assert!(!json);

        let rendered = render(&ctx, json).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_err());
        assert!(rendered.contains("display:"));
    }
}
