//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `PBXGEN_*` environment variables (`PBXGEN_OUTPUT__NO_COLOR=true`)
//! 3. Config file (`--config`, or [`AppConfig::config_path`] if it exists)
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use pbxgen_core::application::generator::DEFAULT_XCODE_VERSION;

const ENV_PREFIX: &str = "PBXGEN";

/// Every key `config get` / `config set` understand.
pub const KEYS: &[&str] = &[
    "xcode_version",
    "output.format",
    "output.no_color",
    "defaults.output_dir",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// `LastUpgradeCheck` used when `--xcode-version` is not given.
    pub xcode_version: String,
    /// Output settings.
    pub output: OutputConfig,
    /// Fallbacks for command arguments.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Where `generate` writes when `--output` is absent.
    pub output_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            xcode_version: DEFAULT_XCODE_VERSION.into(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            defaults: Defaults::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// With `require_file`, an explicit `config_file` must exist. The default
    /// location is always optional.
    pub fn load(config_file: Option<&PathBuf>, require_file: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), require_file),
            None => (Self::config_path(), false),
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("xcode_version", defaults.xcode_version)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pbxgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pbxgen", "pbxgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".pbxgen.toml"))
    }

    /// Value of a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "xcode_version" => Some(self.xcode_version.clone()),
            "output.format" => Some(self.output.format.clone()),
            "output.no_color" => Some(self.output.no_color.to_string()),
            "defaults.output_dir" => Some(
                self.defaults
                    .output_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }
}

/// Write `key = value` into the TOML file at `path`, keeping every other
/// entry. The file and its parent directory are created when missing.
pub fn persist(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    anyhow::ensure!(KEYS.contains(&key), "unknown config key '{key}'");

    let mut table: toml::Table = if path.exists() {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
    } else {
        toml::Table::new()
    };

    let typed = if key == "output.no_color" {
        let flag: bool = value
            .parse()
            .with_context(|| format!("'{value}' is not a boolean"))?;
        toml::Value::Boolean(flag)
    } else {
        toml::Value::String(value.to_string())
    };

    let mut segments: Vec<&str> = key.split('.').collect();
    let leaf = segments.pop().unwrap_or(key);
    let mut current = &mut table;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        if !entry.is_table() {
            *entry = toml::Value::Table(toml::Table::new());
        }
        current = entry
            .as_table_mut()
            .with_context(|| format!("'{segment}' is not a table"))?;
    }
    current.insert(leaf.to_string(), typed);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let rendered = toml::to_string_pretty(&table).context("serialising configuration")?;
    fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))
}
