//! The `Target` entity: one buildable unit of the project spec.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Settings,
    entities::Dependency,
    value_objects::{Platform, TargetType},
};

/// A buildable unit (application, framework, library, extension, tests…).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub target_type: TargetType,
    pub platform: Platform,
    /// Product name; defaults to the target name.
    pub product_name: Option<String>,
    pub sources: Vec<TargetSource>,
    pub dependencies: Vec<Dependency>,
    pub settings: Settings,
    /// Configuration name → `.xcconfig` path relative to the project base.
    pub config_files: BTreeMap<String, String>,
    pub prebuild_scripts: Vec<BuildScript>,
    pub postbuild_scripts: Vec<BuildScript>,
}

impl Target {
    pub fn new(name: impl Into<String>, target_type: TargetType, platform: Platform) -> Self {
        Self {
            name: name.into(),
            target_type,
            platform,
            product_name: None,
            sources: Vec::new(),
            dependencies: Vec::new(),
            settings: Settings::default(),
            config_files: BTreeMap::new(),
            prebuild_scripts: Vec::new(),
            postbuild_scripts: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<TargetSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_config_file(mut self, config: impl Into<String>, path: impl Into<String>) -> Self {
        self.config_files.insert(config.into(), path.into());
        self
    }

    pub fn with_prebuild_script(mut self, script: BuildScript) -> Self {
        self.prebuild_scripts.push(script);
        self
    }

    pub fn with_postbuild_script(mut self, script: BuildScript) -> Self {
        self.postbuild_scripts.push(script);
        self
    }

    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(&self.name)
    }

    /// File name of the built product, e.g. `App.app` or `libCore.a`.
    pub fn filename(&self) -> String {
        let mut filename = self.product_name().to_string();
        if let Some(ext) = self.target_type.file_extension() {
            filename.push('.');
            filename.push_str(ext);
        }
        if self.target_type.is_library() {
            filename = format!("lib{filename}");
        }
        filename
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.platform, self.target_type)
    }
}

/// A source root of a target, relative to the project base.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetSource {
    pub path: String,
    pub compiler_flags: Vec<String>,
    pub excludes: Vec<String>,
}

impl TargetSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl From<&str> for TargetSource {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Where a build script's body comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptSource {
    /// A file relative to the project base, read at generation time.
    Path(String),
    Inline(String),
}

/// A shell script phase run before or after the standard phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildScript {
    pub script: ScriptSource,
    pub name: Option<String>,
    pub shell: Option<String>,
    pub input_files: Vec<String>,
    pub output_files: Vec<String>,
    pub run_only_when_installing: bool,
}

impl BuildScript {
    pub fn new(script: ScriptSource) -> Self {
        Self {
            script,
            name: None,
            shell: None,
            input_files: Vec::new(),
            output_files: Vec::new(),
            run_only_when_installing: false,
        }
    }

    pub fn inline(script: impl Into<String>) -> Self {
        Self::new(ScriptSource::Inline(script.into()))
    }

    pub fn from_path(path: impl Into<String>) -> Self {
        Self::new(ScriptSource::Path(path.into()))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn run_only_when_installing(mut self, value: bool) -> Self {
        self.run_only_when_installing = value;
        self
    }
}
