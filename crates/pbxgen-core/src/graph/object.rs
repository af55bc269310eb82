//! Project-file object kinds.
//!
//! Field names serialize in camelCase so a dump of the graph reads like the
//! `objects` section of a `project.pbxproj`. Flags Xcode stores as `0`/`1`
//! are kept as `u8` for the same reason.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::domain::{BuildSettings, SettingValue};
use crate::graph::Reference;

// ── Kinds ────────────────────────────────────────────────────────────────────

/// Discriminant of [`Object`], also used when deriving references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    BuildFile,
    ContainerItemProxy,
    CopyFilesBuildPhase,
    FileReference,
    FrameworksBuildPhase,
    Group,
    HeadersBuildPhase,
    NativeTarget,
    Project,
    ResourcesBuildPhase,
    ShellScriptBuildPhase,
    SourcesBuildPhase,
    TargetDependency,
    VariantGroup,
    BuildConfiguration,
    ConfigurationList,
}

impl ObjectKind {
    /// The `isa` name in a pbxproj file.
    pub const fn isa(&self) -> &'static str {
        match self {
            Self::BuildFile => "PBXBuildFile",
            Self::ContainerItemProxy => "PBXContainerItemProxy",
            Self::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            Self::FileReference => "PBXFileReference",
            Self::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            Self::Group => "PBXGroup",
            Self::HeadersBuildPhase => "PBXHeadersBuildPhase",
            Self::NativeTarget => "PBXNativeTarget",
            Self::Project => "PBXProject",
            Self::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            Self::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            Self::SourcesBuildPhase => "PBXSourcesBuildPhase",
            Self::TargetDependency => "PBXTargetDependency",
            Self::VariantGroup => "PBXVariantGroup",
            Self::BuildConfiguration => "XCBuildConfiguration",
            Self::ConfigurationList => "XCConfigurationList",
        }
    }

    /// Short prefix used in references, e.g. `FR` for file references.
    pub const fn acronym(&self) -> &'static str {
        match self {
            Self::BuildFile => "BF",
            Self::ContainerItemProxy => "CIP",
            Self::CopyFilesBuildPhase => "CFBP",
            Self::FileReference => "FR",
            Self::FrameworksBuildPhase => "FBP",
            Self::Group => "G",
            Self::HeadersBuildPhase => "HBP",
            Self::NativeTarget => "NT",
            Self::Project => "P",
            Self::ResourcesBuildPhase => "RBP",
            Self::ShellScriptBuildPhase => "SSBP",
            Self::SourcesBuildPhase => "SBP",
            Self::TargetDependency => "TD",
            Self::VariantGroup => "VG",
            Self::BuildConfiguration => "BC",
            Self::ConfigurationList => "CL",
        }
    }
}

// ── Value types ──────────────────────────────────────────────────────────────

/// What a file element's path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceTree {
    #[serde(rename = "<group>")]
    Group,
    #[serde(rename = "SOURCE_ROOT")]
    SourceRoot,
    #[serde(rename = "BUILT_PRODUCTS_DIR")]
    BuildProductsDir,
    #[serde(rename = "<absolute>")]
    Absolute,
    #[serde(rename = "SDKROOT")]
    SdkRoot,
}

/// Destination of a copy-files phase (`dstSubfolderSpec`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubfolderSpec {
    AbsolutePath,
    Wrapper,
    Executables,
    Resources,
    Frameworks,
    SharedFrameworks,
    SharedSupport,
    Plugins,
    ProductsDirectory,
}

impl SubfolderSpec {
    pub const fn code(&self) -> u8 {
        match self {
            Self::AbsolutePath => 0,
            Self::Wrapper => 1,
            Self::Executables => 6,
            Self::Resources => 7,
            Self::Frameworks => 10,
            Self::SharedFrameworks => 11,
            Self::SharedSupport => 12,
            Self::Plugins => 13,
            Self::ProductsDirectory => 16,
        }
    }
}

impl Serialize for SubfolderSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// ── Objects ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub source_tree: SourceTree,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_known_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_index: Option<u8>,
}

impl FileReference {
    pub fn new(path: impl Into<String>, source_tree: SourceTree) -> Self {
        Self {
            source_tree,
            path: path.into(),
            name: None,
            last_known_file_type: None,
            explicit_file_type: None,
            include_in_index: None,
        }
    }
}

/// A `PBXGroup` or `PBXVariantGroup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub children: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub source_tree: SourceTree,
}

impl Group {
    pub fn new(children: Vec<Reference>) -> Self {
        Self {
            children,
            name: None,
            path: None,
            source_tree: SourceTree::Group,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFile {
    pub file_ref: Reference,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BuildSettings,
}

impl BuildFile {
    pub fn new(file_ref: Reference) -> Self {
        Self {
            file_ref,
            settings: BuildSettings::new(),
        }
    }

    pub fn with_settings(file_ref: Reference, settings: BuildSettings) -> Self {
        Self { file_ref, settings }
    }
}

/// Sources, resources, headers and frameworks phases share this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesBuildPhase {
    pub build_action_mask: u32,
    pub files: Vec<Reference>,
    pub run_only_for_deployment_postprocessing: u8,
}

impl FilesBuildPhase {
    pub fn new(files: Vec<Reference>) -> Self {
        Self {
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files,
            run_only_for_deployment_postprocessing: 0,
        }
    }
}

/// `buildActionMask` Xcode writes for every phase.
pub const DEFAULT_BUILD_ACTION_MASK: u32 = 2_147_483_647;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFilesBuildPhase {
    pub build_action_mask: u32,
    pub dst_path: String,
    pub dst_subfolder_spec: SubfolderSpec,
    pub files: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub run_only_for_deployment_postprocessing: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellScriptBuildPhase {
    pub build_action_mask: u32,
    pub files: Vec<Reference>,
    pub input_paths: Vec<String>,
    pub name: String,
    pub output_paths: Vec<String>,
    pub run_only_for_deployment_postprocessing: u8,
    pub shell_path: String,
    pub shell_script: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerItemProxy {
    pub container_portal: Reference,
    pub proxy_type: u8,
    #[serde(rename = "remoteGlobalIDString")]
    pub remote_global_id: Reference,
    pub remote_info: String,
}

/// `proxyType` for a native target in the same project.
pub const PROXY_TYPE_NATIVE_TARGET: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDependency {
    pub target: Reference,
    pub target_proxy: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_configuration_reference: Option<Reference>,
    pub build_settings: BuildSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationList {
    pub build_configurations: Vec<Reference>,
    pub default_configuration_is_visible: u8,
    pub default_configuration_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTarget {
    pub name: String,
    pub build_configuration_list: Reference,
    pub build_phases: Vec<Reference>,
    pub build_rules: Vec<Reference>,
    pub dependencies: Vec<Reference>,
    pub product_name: String,
    pub product_reference: Reference,
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectObject {
    pub attributes: BTreeMap<String, SettingValue>,
    pub build_configuration_list: Reference,
    pub compatibility_version: String,
    pub development_region: String,
    pub has_scanned_for_encodings: u8,
    pub known_regions: Vec<String>,
    pub main_group: Reference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ref_group: Option<Reference>,
    pub project_dir_path: String,
    pub project_root: String,
    pub targets: Vec<Reference>,
}

/// One node of the project graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "isa")]
pub enum Object {
    #[serde(rename = "PBXBuildFile")]
    BuildFile(BuildFile),
    #[serde(rename = "PBXContainerItemProxy")]
    ContainerItemProxy(ContainerItemProxy),
    #[serde(rename = "PBXCopyFilesBuildPhase")]
    CopyFilesBuildPhase(CopyFilesBuildPhase),
    #[serde(rename = "PBXFileReference")]
    FileReference(FileReference),
    #[serde(rename = "PBXFrameworksBuildPhase")]
    FrameworksBuildPhase(FilesBuildPhase),
    #[serde(rename = "PBXGroup")]
    Group(Group),
    #[serde(rename = "PBXHeadersBuildPhase")]
    HeadersBuildPhase(FilesBuildPhase),
    #[serde(rename = "PBXNativeTarget")]
    NativeTarget(NativeTarget),
    #[serde(rename = "PBXProject")]
    Project(ProjectObject),
    #[serde(rename = "PBXResourcesBuildPhase")]
    ResourcesBuildPhase(FilesBuildPhase),
    #[serde(rename = "PBXShellScriptBuildPhase")]
    ShellScriptBuildPhase(ShellScriptBuildPhase),
    #[serde(rename = "PBXSourcesBuildPhase")]
    SourcesBuildPhase(FilesBuildPhase),
    #[serde(rename = "PBXTargetDependency")]
    TargetDependency(TargetDependency),
    #[serde(rename = "PBXVariantGroup")]
    VariantGroup(Group),
    #[serde(rename = "XCBuildConfiguration")]
    BuildConfiguration(BuildConfiguration),
    #[serde(rename = "XCConfigurationList")]
    ConfigurationList(ConfigurationList),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::BuildFile(_) => ObjectKind::BuildFile,
            Self::ContainerItemProxy(_) => ObjectKind::ContainerItemProxy,
            Self::CopyFilesBuildPhase(_) => ObjectKind::CopyFilesBuildPhase,
            Self::FileReference(_) => ObjectKind::FileReference,
            Self::FrameworksBuildPhase(_) => ObjectKind::FrameworksBuildPhase,
            Self::Group(_) => ObjectKind::Group,
            Self::HeadersBuildPhase(_) => ObjectKind::HeadersBuildPhase,
            Self::NativeTarget(_) => ObjectKind::NativeTarget,
            Self::Project(_) => ObjectKind::Project,
            Self::ResourcesBuildPhase(_) => ObjectKind::ResourcesBuildPhase,
            Self::ShellScriptBuildPhase(_) => ObjectKind::ShellScriptBuildPhase,
            Self::SourcesBuildPhase(_) => ObjectKind::SourcesBuildPhase,
            Self::TargetDependency(_) => ObjectKind::TargetDependency,
            Self::VariantGroup(_) => ObjectKind::VariantGroup,
            Self::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Self::ConfigurationList(_) => ObjectKind::ConfigurationList,
        }
    }

    /// Coarse ordering class inside a group: groups first, then files.
    /// `None` for objects that are not file elements.
    pub fn sort_order(&self) -> Option<u8> {
        match self {
            Self::Group(_) => Some(0),
            Self::FileReference(_) | Self::VariantGroup(_) => Some(1),
            _ => None,
        }
    }

    /// Display key of a file element: its name, falling back to its path.
    pub fn name_or_path(&self) -> &str {
        match self {
            Self::Group(g) | Self::VariantGroup(g) => g
                .name
                .as_deref()
                .or(g.path.as_deref())
                .unwrap_or_default(),
            Self::FileReference(f) => f.name.as_deref().unwrap_or(&f.path),
            _ => "",
        }
    }

    /// Every reference this object links to.
    pub fn references(&self) -> Vec<&Reference> {
        match self {
            Self::BuildFile(b) => vec![&b.file_ref],
            Self::ContainerItemProxy(p) => vec![&p.container_portal, &p.remote_global_id],
            Self::CopyFilesBuildPhase(p) => p.files.iter().collect(),
            Self::FileReference(_) => Vec::new(),
            Self::FrameworksBuildPhase(p)
            | Self::HeadersBuildPhase(p)
            | Self::ResourcesBuildPhase(p)
            | Self::SourcesBuildPhase(p) => p.files.iter().collect(),
            Self::Group(g) | Self::VariantGroup(g) => g.children.iter().collect(),
            Self::NativeTarget(t) => std::iter::once(&t.build_configuration_list)
                .chain(&t.build_phases)
                .chain(&t.build_rules)
                .chain(&t.dependencies)
                .chain(std::iter::once(&t.product_reference))
                .collect(),
            Self::Project(p) => std::iter::once(&p.build_configuration_list)
                .chain(std::iter::once(&p.main_group))
                .chain(&p.product_ref_group)
                .chain(&p.targets)
                .collect(),
            Self::ShellScriptBuildPhase(p) => p.files.iter().collect(),
            Self::TargetDependency(d) => vec![&d.target, &d.target_proxy],
            Self::BuildConfiguration(c) => c.base_configuration_reference.iter().collect(),
            Self::ConfigurationList(l) => l.build_configurations.iter().collect(),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_file_reference(&self) -> Option<&FileReference> {
        match self {
            Self::FileReference(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_build_file(&self) -> Option<&BuildFile> {
        match self {
            Self::BuildFile(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_native_target(&self) -> Option<&NativeTarget> {
        match self {
            Self::NativeTarget(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_build_configuration(&self) -> Option<&BuildConfiguration> {
        match self {
            Self::BuildConfiguration(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectObject> {
        match self {
            Self::Project(p) => Some(p),
            _ => None,
        }
    }

    /// File list of any phase kind.
    pub fn phase_files(&self) -> Option<&[Reference]> {
        match self {
            Self::FrameworksBuildPhase(p)
            | Self::HeadersBuildPhase(p)
            | Self::ResourcesBuildPhase(p)
            | Self::SourcesBuildPhase(p) => Some(&p.files),
            Self::CopyFilesBuildPhase(p) => Some(&p.files),
            Self::ShellScriptBuildPhase(p) => Some(&p.files),
            _ => None,
        }
    }
}
