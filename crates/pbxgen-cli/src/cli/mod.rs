//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Manifest looked up in the current directory when none is given.
pub const DEFAULT_MANIFEST: &str = "project.yml";

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pbxgen",
    bin_name = "pbxgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Xcode projects from a project spec",
    long_about = "pbxgen reads a YAML, JSON or TOML project manifest, scans the \
                  source directories it names and writes a deterministic \
                  <Name>.xcodeproj/project.pbxproj.",
    after_help = "EXAMPLES:\n\
        \x20 pbxgen generate\n\
        \x20 pbxgen generate app/project.yml --output build\n\
        \x20 pbxgen dump project.toml > graph.json\n\
        \x20 pbxgen completions bash > /usr/share/bash-completion/completions/pbxgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an Xcode project from a manifest.
    #[command(
        visible_alias = "g",
        about = "Generate a .xcodeproj",
        after_help = "EXAMPLES:\n\
            \x20 pbxgen generate\n\
            \x20 pbxgen generate project.json --output out\n\
            \x20 pbxgen generate --strict --xcode-version 1500"
    )]
    Generate(GenerateArgs),

    /// Print the generated object graph as JSON.
    #[command(
        about = "Print the object graph as JSON",
        after_help = "EXAMPLES:\n\
            \x20 pbxgen dump\n\
            \x20 pbxgen dump project.yml --compact"
    )]
    Dump(DumpArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pbxgen completions bash > ~/.local/share/bash-completion/completions/pbxgen\n\
            \x20 pbxgen completions zsh  > ~/.zfunc/_pbxgen\n\
            \x20 pbxgen completions fish > ~/.config/fish/completions/pbxgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the pbxgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pbxgen config get xcode_version\n\
            \x20 pbxgen config set defaults.output_dir build\n\
            \x20 pbxgen config list"
    )]
    Config(ConfigCommands),
}

// ── generate / dump ───────────────────────────────────────────────────────────

/// Options shared by every command that runs the generator.
#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Project manifest (`.yml`, `.yaml`, `.json` or `.toml`).
    #[arg(
        value_name = "MANIFEST",
        default_value = DEFAULT_MANIFEST,
        help = "Project manifest path"
    )]
    pub manifest: PathBuf,

    /// `LastUpgradeCheck` written to the project attributes.
    #[arg(
        long = "xcode-version",
        value_name = "VERSION",
        help = "Xcode version recorded in the project (e.g. 0930)"
    )]
    pub xcode_version: Option<String>,

    /// Fail on dependencies that name unknown targets.
    #[arg(long = "strict", help = "Treat unknown target dependencies as errors")]
    pub strict: bool,
}

/// Arguments for `pbxgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Directory the `.xcodeproj` bundle is written to.
    ///
    /// Defaults to `defaults.output_dir` from the configuration, then to the
    /// manifest's directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Print what would be written without touching the file system.
    #[arg(long = "dry-run", help = "Render the project without writing it")]
    pub dry_run: bool,
}

/// Arguments for `pbxgen dump`.
#[derive(Debug, Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long = "compact", help = "Print compact JSON")]
    pub compact: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pbxgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `pbxgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}
