//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Mirage - browser profile validation and extension conflict checks
#[derive(Parser, Debug)]
#[command(name = "mirage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.yaml (default: ~/.mirage)
    #[arg(long, global = true, env = "MIRAGE_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    /// Extra conflict rule table merged over the built-in rules
    #[arg(long, global = true)]
    pub rules: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile validation and migration
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Extension conflict checks
    #[command(subcommand)]
    Extension(ExtensionCommands),

    /// Inspect conflict rules
    #[command(subcommand)]
    Rules(RulesCommands),

    /// Runtime configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

// Profile commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Upgrade a profile and check its business rules
    Validate(ProfileValidateArgs),

    /// Migrate a profile to the current schema version
    Upgrade(ProfileUpgradeArgs),
}

#[derive(Args, Debug)]
pub struct ProfileValidateArgs {
    /// Profile JSON file
    pub file: Utf8PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ProfileUpgradeArgs {
    /// Profile JSON file
    pub file: Utf8PathBuf,

    /// Write the upgraded profile here instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}

// Extension commands
#[derive(Subcommand, Debug)]
pub enum ExtensionCommands {
    /// Find conflicts among a profile's enabled extensions
    Check(ExtensionCheckArgs),

    /// Check whether one extension can be enabled in a profile
    Compat(ExtensionCompatArgs),
}

#[derive(Args, Debug)]
pub struct ExtensionCheckArgs {
    /// Profile JSON file
    pub file: Utf8PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Apply auto-resolutions and report what is left
    #[arg(long)]
    pub resolve: bool,

    /// Write the profile with resolved extensions here (requires --resolve)
    #[arg(short, long, requires = "resolve")]
    pub output: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExtensionCompatArgs {
    /// Profile JSON file
    pub file: Utf8PathBuf,

    /// Name of the extension to add or enable
    #[arg(short, long)]
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Rules commands
#[derive(Subcommand, Debug)]
pub enum RulesCommands {
    /// List all conflict rules
    List(RulesListArgs),

    /// Show one conflict rule
    Show(RulesShowArgs),
}

#[derive(Args, Debug)]
pub struct RulesListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RulesShowArgs {
    /// Extension name the rule is declared on
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective runtime configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
