//! Project generator - compiles a `ProjectSpec` into an `ObjectGraph`.
//!
//! The generator drives one run through these steps:
//! 1. Declared file groups
//! 2. Project configurations
//! 3. Product file references for every target
//! 4. Settings, dependencies and phases per target
//! 5. Products, Frameworks and main groups, then the group sort
//! 6. The project root object

pub mod dependencies;
pub mod groups;
pub mod phases;
pub mod presets;
pub mod settings;
pub mod xcconfig;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{GenerationError, ports::SourceScanner},
    domain::{Config, ProjectSpec, SettingValue, Target, TargetType, settings::merge_into},
    error::CoreResult,
    graph::{
        BuildConfiguration, BuildFile, ConfigurationList, FileReference, NativeTarget, Object,
        ObjectGraph, ObjectKind, ProjectObject, Reference, SourceTree,
    },
};

use dependencies::{
    DependencyResolver, FrameworkCollector, carthage_dependencies, carthage_frameworks_to_embed,
    carthage_platform_path,
};
use phases::{PhaseAssembler, PhaseInputs};
use settings::{ImplicitSettings, SettingsResolver};

/// Xcode version written as `LastUpgradeCheck` when none is configured.
pub const DEFAULT_XCODE_VERSION: &str = "0930";

/// `compatibilityVersion` of the project object.
pub const COMPATIBILITY_VERSION: &str = "Xcode 3.2";

const DEFAULT_DEVELOPMENT_REGION: &str = "en";

/// Knobs that come from the surrounding tool rather than the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub xcode_version: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            xcode_version: DEFAULT_XCODE_VERSION.to_string(),
        }
    }
}

/// The output of one run: the graph and its root project object.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub name: String,
    pub root: Reference,
    pub graph: ObjectGraph,
}

/// References created up front for one target's product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub native_target: Reference,
    pub file_reference: Reference,
    pub build_file: Reference,
}

/// Target name → product references.
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    products: BTreeMap<String, Product>,
}

impl ProductIndex {
    pub fn insert(&mut self, target: &str, product: Product) {
        self.products.insert(target.to_string(), product);
    }

    pub fn require(&self, target: &str) -> Result<&Product, GenerationError> {
        self.products
            .get(target)
            .ok_or_else(|| GenerationError::MissingProduct {
                target: target.to_string(),
            })
    }
}

/// Compiles one spec into one graph.
///
/// A generator is single-use: the second call to [`generate`](Self::generate)
/// fails with [`GenerationError::AlreadyGenerated`].
pub struct ProjectGenerator {
    spec: ProjectSpec,
    scanner: Box<dyn SourceScanner>,
    options: GeneratorOptions,
    generated: bool,
}

impl ProjectGenerator {
    pub fn new(
        spec: ProjectSpec,
        scanner: Box<dyn SourceScanner>,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            spec,
            scanner,
            options,
            generated: false,
        }
    }

    #[instrument(skip_all, fields(project = %self.spec.name, targets = self.spec.targets.len()))]
    pub fn generate(&mut self) -> CoreResult<GeneratedProject> {
        if self.generated {
            return Err(GenerationError::AlreadyGenerated.into());
        }
        self.generated = true;

        let mut graph = ObjectGraph::new();
        let project = graph.reserve(ObjectKind::Project, &self.spec.name);
        let run = Run {
            spec: &self.spec,
            scanner: self.scanner.as_mut(),
            options: &self.options,
            graph,
            products: ProductIndex::default(),
            collector: FrameworkCollector::new(),
            project,
        };
        let project = run.execute()?;

        info!(objects = project.graph.len(), "Project graph generated");
        Ok(project)
    }
}

/// State of one generation run.
struct Run<'a> {
    spec: &'a ProjectSpec,
    scanner: &'a mut dyn SourceScanner,
    options: &'a GeneratorOptions,
    graph: ObjectGraph,
    products: ProductIndex,
    collector: FrameworkCollector,
    project: Reference,
}

impl Run<'_> {
    fn execute(mut self) -> CoreResult<GeneratedProject> {
        let spec = self.spec;

        for group in &spec.file_groups {
            self.scanner
                .file_group(&mut self.graph, &spec.base_path.join(group))?;
        }

        let configuration_list = self.project_configurations()?;

        for target in &spec.targets {
            self.register_product(target);
        }

        let mut targets = Vec::with_capacity(spec.targets.len());
        for target in &spec.targets {
            targets.push(self.generate_target(target)?);
        }

        let product_files = spec
            .targets
            .iter()
            .map(|t| self.products.require(&t.name).map(|p| p.file_reference.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let products_group = groups::products_group(&mut self.graph, product_files);
        let frameworks_group = groups::frameworks_group(
            &mut self.graph,
            &self.collector,
            spec.options.carthage_build_path(),
        );

        let mut top_level = self.scanner.root_groups(&mut self.graph)?;
        top_level.push(products_group.clone());
        top_level.extend(frameworks_group);
        let main_group = groups::main_group(&mut self.graph, top_level);
        groups::sort_groups(&mut self.graph, &main_group)?;

        let mut known_regions = self.scanner.known_regions();
        known_regions.sort();
        known_regions.dedup();

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "LastUpgradeCheck".to_string(),
            SettingValue::from(self.options.xcode_version.as_str()),
        );
        merge_into(&mut attributes, &spec.attributes);

        let root = ProjectObject {
            attributes,
            build_configuration_list: configuration_list,
            compatibility_version: COMPATIBILITY_VERSION.to_string(),
            development_region: spec
                .options
                .development_language
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVELOPMENT_REGION.to_string()),
            has_scanned_for_encodings: 0,
            known_regions,
            main_group,
            product_ref_group: Some(products_group),
            project_dir_path: String::new(),
            project_root: String::new(),
            targets,
        };
        self.graph.insert(self.project.clone(), Object::Project(root))?;
        self.graph.set_root(self.project.clone());

        Ok(GeneratedProject {
            name: spec.name.clone(),
            root: self.project,
            graph: self.graph,
        })
    }

    fn project_configurations(&mut self) -> CoreResult<Reference> {
        let spec = self.spec;
        let resolver = SettingsResolver::new(spec);

        let mut configurations = Vec::with_capacity(spec.configs.len());
        for config in &spec.configs {
            let base = spec.config_files.get(&config.name).map(|path| {
                self.scanner
                    .contained_file_reference(&mut self.graph, &spec.base_path.join(path))
            });
            configurations.push(self.graph.add(
                Object::BuildConfiguration(BuildConfiguration {
                    name: config.name.clone(),
                    base_configuration_reference: base,
                    build_settings: resolver.project_settings(config),
                }),
                &config.name,
            ));
        }

        Ok(self.configuration_list(configurations, &spec.name))
    }

    fn configuration_list(&mut self, configurations: Vec<Reference>, context: &str) -> Reference {
        let default_name = self
            .spec
            .configs
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default();
        self.graph.add(
            Object::ConfigurationList(ConfigurationList {
                build_configurations: configurations,
                default_configuration_is_visible: 0,
                default_configuration_name: default_name,
            }),
            context,
        )
    }

    fn register_product(&mut self, target: &Target) {
        let native_target = self.graph.reserve(ObjectKind::NativeTarget, &target.name);

        let mut file = FileReference::new(target.filename(), SourceTree::BuildProductsDir);
        file.explicit_file_type = Some(target.target_type.explicit_file_type().to_string());
        file.include_in_index = Some(0);
        let file_reference = self.graph.add(Object::FileReference(file), &target.name);

        let build_file = self.graph.add(
            Object::BuildFile(BuildFile::new(file_reference.clone())),
            file_reference.as_str(),
        );

        self.products.insert(
            &target.name,
            Product {
                native_target,
                file_reference,
                build_file,
            },
        );
    }

    #[instrument(skip_all, fields(target = %target))]
    fn generate_target(&mut self, target: &Target) -> CoreResult<Reference> {
        let spec = self.spec;
        let carthage = carthage_dependencies(spec, target);
        let source_files = self.scanner.source_files(&mut self.graph, target)?;
        debug!(files = source_files.len(), "Sources scanned");

        let configurations = self.target_configurations(target, !carthage.is_empty())?;
        let configuration_list = self.configuration_list(configurations, &target.name);

        let resolver = DependencyResolver::new(spec, &self.products, &self.project);
        let dependencies = resolver.resolve(
            target,
            &mut self.graph,
            &mut *self.scanner,
            &mut self.collector,
        )?;
        let target_dependencies = dependencies.target_dependencies.clone();

        let inputs = PhaseInputs {
            source_files,
            dependencies,
            carthage_frameworks: carthage_frameworks_to_embed(&carthage),
        };
        let build_phases =
            PhaseAssembler::new(spec).assemble(target, &mut self.graph, &*self.scanner, inputs)?;

        let product = self.products.require(&target.name)?.clone();
        self.graph.insert(
            product.native_target.clone(),
            Object::NativeTarget(NativeTarget {
                name: target.name.clone(),
                build_configuration_list: configuration_list,
                build_phases,
                build_rules: Vec::new(),
                dependencies: target_dependencies,
                product_name: target.product_name().to_string(),
                product_reference: product.file_reference,
                product_type: target.target_type.product_type(),
            }),
        )?;
        Ok(product.native_target)
    }

    fn target_configurations(
        &mut self,
        target: &Target,
        has_carthage: bool,
    ) -> CoreResult<Vec<Reference>> {
        let spec = self.spec;
        let resolver = SettingsResolver::new(spec);

        let implicit = ImplicitSettings {
            info_plist: self.info_plist(target),
            bundle_id_prefix: spec.options.bundle_id_prefix.as_deref(),
            test_target_name: test_target_name(spec, target),
            carthage_search_path: has_carthage
                .then(|| format!("$(PROJECT_DIR)/{}", carthage_platform_path(spec, target.platform))),
        };

        let mut configurations = Vec::with_capacity(spec.configs.len());
        for config in &spec.configs {
            let mut build_settings = resolver.target_settings(target, config);
            let config_file = target.config_files.get(&config.name);
            let xcconfig = config_file
                .map(|path| xcconfig::load(&*self.scanner, &spec.base_path.join(path)))
                .unwrap_or_default();
            implicit.apply(&target.name, &mut build_settings, &xcconfig);

            let base = config_file.map(|path| {
                self.scanner
                    .contained_file_reference(&mut self.graph, &spec.base_path.join(path))
            });
            configurations.push(self.graph.add(
                Object::BuildConfiguration(BuildConfiguration {
                    name: config.name.clone(),
                    base_configuration_reference: base,
                    build_settings,
                }),
                &configuration_context(config, target),
            ));
        }
        Ok(configurations)
    }

    /// First `Info.plist` under the target's sources, relative to the base.
    fn info_plist(&self, target: &Target) -> Option<String> {
        let base = &self.spec.base_path;
        target
            .sources
            .iter()
            .flat_map(|source| self.scanner.find_files(&base.join(&source.path), "Info.plist"))
            .next()
            .map(|path| relative_to(&path, base))
    }
}

fn configuration_context(config: &Config, target: &Target) -> String {
    format!("{}{}", config.name, target.name)
}

/// The application a UI test bundle tests: its first target dependency that
/// is an application.
fn test_target_name<'a>(spec: &'a ProjectSpec, target: &Target) -> Option<&'a str> {
    if target.target_type != TargetType::UiTestBundle {
        return None;
    }
    target
        .dependencies
        .iter()
        .filter_map(|d| d.target_name())
        .filter_map(|name| spec.get_target(name))
        .find(|t| t.target_type == TargetType::Application)
        .map(|t| t.name.as_str())
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
