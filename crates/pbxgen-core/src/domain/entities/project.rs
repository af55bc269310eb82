//! The `ProjectSpec` aggregate: the normalized project description the
//! generator compiles into an object graph.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    SettingValue, Settings,
    entities::Target,
    value_objects::{ConfigType, SettingPresets},
};

/// Default location of Carthage build products.
pub const DEFAULT_CARTHAGE_BUILD_PATH: &str = "Carthage/Build";

/// Default Carthage executable used by the copy-frameworks script phase.
pub const DEFAULT_CARTHAGE_EXECUTABLE: &str = "carthage";

/// A named build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    pub config_type: Option<ConfigType>,
}

impl Config {
    pub fn new(name: impl Into<String>, config_type: Option<ConfigType>) -> Self {
        Self {
            name: name.into(),
            config_type,
        }
    }

    pub fn debug(name: impl Into<String>) -> Self {
        Self::new(name, Some(ConfigType::Debug))
    }

    pub fn release(name: impl Into<String>) -> Self {
        Self::new(name, Some(ConfigType::Release))
    }

    /// The `Debug` / `Release` pair used when a spec declares no configs.
    pub fn defaults() -> Vec<Self> {
        vec![Self::debug("Debug"), Self::release("Release")]
    }
}

/// Project-wide generation options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecOptions {
    pub bundle_id_prefix: Option<String>,
    pub carthage_build_path: Option<String>,
    pub carthage_executable_path: Option<String>,
    pub development_language: Option<String>,
    pub setting_presets: SettingPresets,
    /// Fail instead of skipping when a target dependency names an unknown
    /// target.
    pub strict_dependencies: bool,
}

impl SpecOptions {
    pub fn carthage_build_path(&self) -> &str {
        self.carthage_build_path
            .as_deref()
            .unwrap_or(DEFAULT_CARTHAGE_BUILD_PATH)
    }

    pub fn carthage_executable_path(&self) -> &str {
        self.carthage_executable_path
            .as_deref()
            .unwrap_or(DEFAULT_CARTHAGE_EXECUTABLE)
    }
}

/// The whole project description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    /// Directory every relative spec path resolves against.
    pub base_path: PathBuf,
    pub configs: Vec<Config>,
    pub targets: Vec<Target>,
    pub settings: Settings,
    pub setting_groups: BTreeMap<String, Settings>,
    /// Configuration name → project-level `.xcconfig` path.
    pub config_files: BTreeMap<String, String>,
    /// Directories added to the project tree without belonging to a target.
    pub file_groups: Vec<String>,
    pub options: SpecOptions,
    pub attributes: BTreeMap<String, SettingValue>,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_path: base_path.into(),
            configs: Config::defaults(),
            targets: Vec::new(),
            settings: Settings::default(),
            setting_groups: BTreeMap::new(),
            config_files: BTreeMap::new(),
            file_groups: Vec::new(),
            options: SpecOptions::default(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_configs(mut self, configs: Vec<Config>) -> Self {
        self.configs = configs;
        self
    }

    pub fn with_options(mut self, options: SpecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_file_group(mut self, path: impl Into<String>) -> Self {
        self.file_groups.push(path.into());
        self
    }

    pub fn get_target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }
}
