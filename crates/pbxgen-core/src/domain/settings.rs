//! Build settings values and the layered `Settings` declaration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered key → value mapping of Xcode build settings.
pub type BuildSettings = BTreeMap<String, SettingValue>;

/// A single build setting value.
///
/// Xcode only distinguishes scalars and string lists; booleans and numbers
/// are kept apart so manifests round-trip faithfully (`YES`/`NO` rendering is
/// the writer's concern).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<String>),
}

impl SettingValue {
    /// Scalar rendering of the value; lists are joined with spaces.
    pub fn as_scalar(&self) -> String {
        match self {
            Self::Bool(true) => "YES".to_string(),
            Self::Bool(false) => "NO".to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::List(items) => items.join(" "),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_scalar())
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Settings as declared in a spec, at project or target level.
///
/// Resolution order for a configuration: named `groups` (recursively), then
/// `build_settings`, then every `config_settings` entry whose key is
/// contained (case-insensitively) in the configuration name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub build_settings: BuildSettings,
    pub config_settings: BTreeMap<String, Settings>,
    pub groups: Vec<String>,
}

impl Settings {
    pub fn new(build_settings: BuildSettings) -> Self {
        Self {
            build_settings,
            ..Self::default()
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.build_settings.insert(key.into(), value.into());
        self
    }

    pub fn with_config_settings(mut self, variant: impl Into<String>, settings: Settings) -> Self {
        self.config_settings.insert(variant.into(), settings);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.build_settings.is_empty() && self.config_settings.is_empty() && self.groups.is_empty()
    }
}

/// Merge `other` over `base`, later keys winning.
pub fn merge_into(base: &mut BuildSettings, other: &BuildSettings) {
    for (key, value) in other {
        base.insert(key.clone(), value.clone());
    }
}
