//! Filesystem-based manifest loader.
//!
//! Parses a project manifest (YAML, JSON or TOML, picked by file extension)
//! into a domain [`ProjectSpec`]. Relative paths in the manifest stay relative;
//! the spec's base path is the manifest's directory.
//!
//! # Manifest format
//!
//! ```yaml
//! name: MyApp
//! options:
//!   bundleIdPrefix: com.example
//!   carthageBuildPath: Carthage/Build     # optional
//!   strictDependencies: false             # optional
//! configs:
//!   Debug: debug
//!   Release: release
//! settings:
//!   base:
//!     SWIFT_VERSION: "5.0"
//!   configs:
//!     debug:
//!       SWIFT_OPTIMIZATION_LEVEL: -Onone
//! targets:
//!   MyApp:
//!     type: application
//!     platform: iOS
//!     sources: [MyApp]
//!     dependencies:
//!       - target: MyKit
//!       - carthage: Alamofire
//!       - framework: Vendor/Analytics.framework
//!         embed: false
//!     postbuildScripts:
//!       - name: Lint
//!         script: swiftlint
//!   MyKit:
//!     type: framework
//!     platform: iOS
//!     sources: MyKit
//! ```
//!
//! `settings` blocks are either a flat key → value map or a structured
//! `{base, configs, groups}` map.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use pbxgen_core::domain::{
    BuildScript, Config, ConfigType, Dependency, DomainError, Platform, ProjectSpec,
    ScriptSource, SettingPresets, SettingValue, Settings, SpecOptions, Target, TargetSource,
    TargetType,
};
use pbxgen_core::error::{CoreError, CoreResult};

// ── Format ────────────────────────────────────────────────────────────────────

/// Serialization format of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestFormat {
    /// Pick the format from the file extension (`.yml`, `.yaml`, `.json`,
    /// `.toml`, case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// A `settings` block before it is interpreted: flat or structured.
pub type SettingsEntry = BTreeMap<String, Value>;

/// Deserialized representation of a project manifest.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    pub name: String,
    #[serde(default)]
    pub options: OptionsSection,
    /// Configuration name → `debug` / `release`.
    #[serde(default)]
    pub configs: BTreeMap<String, Option<String>>,
    pub settings: Option<SettingsEntry>,
    #[serde(default)]
    pub setting_groups: BTreeMap<String, SettingsEntry>,
    #[serde(default)]
    pub config_files: BTreeMap<String, String>,
    #[serde(default)]
    pub file_groups: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, SettingValue>,
    /// Keyed by target name; iteration order is the name order.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetEntry>,
}

/// `options` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsSection {
    pub bundle_id_prefix: Option<String>,
    pub carthage_build_path: Option<String>,
    pub carthage_executable_path: Option<String>,
    pub development_language: Option<String>,
    /// `all` | `project` | `targets` | `none`.
    pub setting_presets: Option<String>,
    pub strict_dependencies: bool,
}

/// One entry under `targets`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntry {
    #[serde(rename = "type")]
    pub target_type: String,
    pub platform: String,
    pub product_name: Option<String>,
    pub sources: Option<SourcesEntry>,
    pub settings: Option<SettingsEntry>,
    #[serde(default)]
    pub config_files: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    #[serde(default)]
    pub prebuild_scripts: Vec<ScriptEntry>,
    #[serde(default)]
    pub postbuild_scripts: Vec<ScriptEntry>,
}

/// `sources`: a single source or a list of them.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SourcesEntry {
    One(SourceEntry),
    Many(Vec<SourceEntry>),
}

/// A source root: a bare path or a detailed map.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SourceEntry {
    Path(String),
    Detailed(DetailedSource),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSource {
    pub path: String,
    pub compiler_flags: Option<StringOrList>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

/// A value that may be written as one string or a list.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => s.split_whitespace().map(str::to_string).collect(),
            Self::Many(items) => items,
        }
    }
}

/// One entry under a target's `dependencies`. Exactly one of `target`,
/// `framework` and `carthage` must be set.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEntry {
    pub target: Option<String>,
    pub framework: Option<String>,
    pub carthage: Option<String>,
    pub embed: Option<bool>,
    pub link: Option<bool>,
    pub implicit: Option<bool>,
    pub code_sign: Option<bool>,
    pub remove_headers: Option<bool>,
}

/// One pre- or post-build script. Exactly one of `path` and `script` must be
/// set.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    pub path: Option<String>,
    pub script: Option<String>,
    pub name: Option<String>,
    pub shell: Option<String>,
    #[serde(default)]
    pub input_files: Vec<String>,
    #[serde(default)]
    pub output_files: Vec<String>,
    #[serde(default)]
    pub run_only_when_installing: bool,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads a [`ProjectSpec`] from a manifest file.
///
/// # Example
///
/// ```no_run
/// use pbxgen_adapters::SpecLoader;
///
/// let spec = SpecLoader::new("project.yml").load()?;
/// println!("{} targets", spec.targets.len());
/// # Ok::<(), pbxgen_core::error::CoreError>(())
/// ```
pub struct SpecLoader {
    manifest_path: PathBuf,
}

impl SpecLoader {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Read and parse the manifest.
    ///
    /// # Errors
    ///
    /// [`CoreError::Manifest`] when the file is missing, has an unsupported
    /// extension or does not parse; [`CoreError::Domain`] when a value is
    /// outside the model (unknown target type, dependency without a kind).
    #[instrument(skip(self), fields(manifest = %self.manifest_path.display()))]
    pub fn load(&self) -> CoreResult<ProjectSpec> {
        let path = &self.manifest_path;
        let format = ManifestFormat::from_path(path)
            .ok_or_else(|| manifest_error(path, "unsupported manifest extension"))?;

        let raw = fs::read_to_string(path)
            .map_err(|e| manifest_error(path, format!("failed to read: {e}")))?;

        let base_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base_path = std::path::absolute(&base_path)
            .map_err(|e| manifest_error(path, format!("failed to resolve directory: {e}")))?;

        let spec = parse_manifest(&raw, format, path, base_path)?;
        debug!(
            project = %spec.name,
            targets = spec.targets.len(),
            "Manifest loaded"
        );
        Ok(spec)
    }
}

/// Parse manifest text. `manifest_path` is only used in error messages.
pub fn parse_manifest(
    raw: &str,
    format: ManifestFormat,
    manifest_path: &Path,
    base_path: impl Into<PathBuf>,
) -> CoreResult<ProjectSpec> {
    let manifest: ProjectManifest = match format {
        ManifestFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
        ManifestFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        ManifestFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
    }
    .map_err(|reason| manifest_error(manifest_path, reason))?;

    Converter {
        manifest_path,
    }
    .project(manifest, base_path.into())
}

fn manifest_error(path: &Path, reason: impl Into<String>) -> CoreError {
    CoreError::Manifest {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

struct Converter<'a> {
    manifest_path: &'a Path,
}

impl Converter<'_> {
    fn project(&self, manifest: ProjectManifest, base_path: PathBuf) -> CoreResult<ProjectSpec> {
        let mut spec = ProjectSpec::new(manifest.name, base_path);

        if !manifest.configs.is_empty() {
            spec.configs = manifest
                .configs
                .into_iter()
                .map(|(name, ty)| {
                    let config_type = ty.as_deref().map(str::parse::<ConfigType>).transpose()?;
                    Ok(Config::new(name, config_type))
                })
                .collect::<Result<_, DomainError>>()?;
        }

        spec.options = self.options(manifest.options)?;
        if let Some(settings) = &manifest.settings {
            spec.settings = self.settings(settings, "settings")?;
        }
        for (name, group) in &manifest.setting_groups {
            let settings = self.settings(group, &format!("settingGroups.{name}"))?;
            spec.setting_groups.insert(name.clone(), settings);
        }
        spec.config_files = manifest.config_files;
        spec.file_groups = manifest.file_groups;
        spec.attributes = manifest.attributes;

        for (name, entry) in manifest.targets {
            let target = self.target(name, entry)?;
            spec.targets.push(target);
        }
        Ok(spec)
    }

    fn options(&self, section: OptionsSection) -> CoreResult<SpecOptions> {
        let setting_presets = section
            .setting_presets
            .as_deref()
            .map(str::parse::<SettingPresets>)
            .transpose()?
            .unwrap_or_default();

        Ok(SpecOptions {
            bundle_id_prefix: section.bundle_id_prefix,
            carthage_build_path: section.carthage_build_path,
            carthage_executable_path: section.carthage_executable_path,
            development_language: section.development_language,
            setting_presets,
            strict_dependencies: section.strict_dependencies,
        })
    }

    fn target(&self, name: String, entry: TargetEntry) -> CoreResult<Target> {
        let target_type: TargetType = entry.target_type.parse()?;
        let platform: Platform = entry.platform.parse()?;
        let mut target = Target::new(name, target_type, platform);
        target.product_name = entry.product_name;

        target.sources = match entry.sources {
            None => Vec::new(),
            Some(SourcesEntry::One(source)) => vec![source_of(source)],
            Some(SourcesEntry::Many(sources)) => sources.into_iter().map(source_of).collect(),
        };

        if let Some(settings) = &entry.settings {
            target.settings = self.settings(settings, &format!("targets.{}.settings", target.name))?;
        }
        target.config_files = entry.config_files;

        target.dependencies = entry
            .dependencies
            .into_iter()
            .map(|d| dependency_of(&target.name, d))
            .collect::<Result<_, _>>()?;
        target.prebuild_scripts = entry
            .prebuild_scripts
            .into_iter()
            .map(|s| script_of(&target.name, s))
            .collect::<Result<_, _>>()?;
        target.postbuild_scripts = entry
            .postbuild_scripts
            .into_iter()
            .map(|s| script_of(&target.name, s))
            .collect::<Result<_, _>>()?;

        Ok(target)
    }

    /// Interpret a settings block. A block with any of the `base`, `configs`
    /// or `groups` keys is structured; anything else is a flat setting map.
    fn settings(&self, entry: &SettingsEntry, at: &str) -> CoreResult<Settings> {
        let structured = ["base", "configs", "groups"]
            .iter()
            .any(|key| entry.contains_key(*key));
        if !structured {
            return Ok(Settings {
                build_settings: self.values(entry, at)?,
                ..Settings::default()
            });
        }

        let mut settings = Settings::default();
        if let Some(base) = entry.get("base") {
            let base: SettingsEntry = self.decode(base, &format!("{at}.base"))?;
            settings.build_settings = self.values(&base, at)?;
        }
        if let Some(configs) = entry.get("configs") {
            let configs: BTreeMap<String, SettingsEntry> =
                self.decode(configs, &format!("{at}.configs"))?;
            for (variant, block) in &configs {
                let nested = self.settings(block, &format!("{at}.configs.{variant}"))?;
                settings.config_settings.insert(variant.clone(), nested);
            }
        }
        if let Some(groups) = entry.get("groups") {
            settings.groups = self.decode(groups, &format!("{at}.groups"))?;
        }
        Ok(settings)
    }

    fn values(&self, entry: &SettingsEntry, at: &str) -> CoreResult<BTreeMap<String, SettingValue>> {
        entry
            .iter()
            .map(|(key, value)| Ok((key.clone(), self.decode(value, &format!("{at}.{key}"))?)))
            .collect()
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, value: &Value, at: &str) -> CoreResult<T> {
        serde_json::from_value(value.clone())
            .map_err(|e| manifest_error(self.manifest_path, format!("{at}: {e}")))
    }
}

fn source_of(entry: SourceEntry) -> TargetSource {
    match entry {
        SourceEntry::Path(path) => TargetSource::new(path),
        SourceEntry::Detailed(detailed) => TargetSource {
            path: detailed.path,
            compiler_flags: detailed
                .compiler_flags
                .map(StringOrList::into_vec)
                .unwrap_or_default(),
            excludes: detailed.excludes,
        },
    }
}

fn dependency_of(target: &str, entry: DependencyEntry) -> Result<Dependency, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidDependency {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    let mut dependency = match (entry.target, entry.framework, entry.carthage) {
        (Some(name), None, None) => {
            Dependency::target(name).link(entry.link.unwrap_or(true))
        }
        (None, Some(path), None) => {
            if entry.implicit.unwrap_or(false) {
                Dependency::implicit_framework(path)
            } else {
                Dependency::framework(path)
            }
        }
        (None, None, Some(name)) => Dependency::carthage(name),
        (None, None, None) => return Err(invalid("no target, framework or carthage key")),
        _ => return Err(invalid("more than one of target, framework and carthage")),
    };

    dependency.embed = entry.embed;
    if let Some(code_sign) = entry.code_sign {
        dependency.code_sign = code_sign;
    }
    if let Some(remove_headers) = entry.remove_headers {
        dependency.remove_headers = remove_headers;
    }
    Ok(dependency)
}

fn script_of(target: &str, entry: ScriptEntry) -> Result<BuildScript, DomainError> {
    let source = match (entry.path, entry.script) {
        (Some(path), None) => ScriptSource::Path(path),
        (None, Some(body)) => ScriptSource::Inline(body),
        (path, _) => {
            return Err(DomainError::InvalidBuildScript {
                target: target.to_string(),
                reason: if path.is_some() {
                    "both path and script are set".into()
                } else {
                    "neither path nor script is set".into()
                },
            });
        }
    };

    Ok(BuildScript {
        script: source,
        name: entry.name,
        shell: entry.shell,
        input_files: entry.input_files,
        output_files: entry.output_files,
        run_only_when_installing: entry.run_only_when_installing,
    })
}
