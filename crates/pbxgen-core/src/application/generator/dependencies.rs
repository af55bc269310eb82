//! Dependency resolution: target, framework and Carthage dependencies become
//! proxies, link files and embed files.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::application::{GenerationError, generator::ProductIndex, ports::SourceScanner};
use crate::domain::{Dependency, DependencyKind, Platform, ProjectSpec, Target};
use crate::graph::{
    BuildFile, ContainerItemProxy, Object, ObjectGraph, PROXY_TYPE_NATIVE_TARGET, Reference,
    SourceTree, TargetDependency,
};

/// Framework file references shared by every target of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameworkCollector {
    framework_files: Vec<Reference>,
    carthage: BTreeMap<String, BTreeSet<Reference>>,
}

impl FrameworkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path-based framework; adding one twice is a no-op.
    pub fn add_framework(&mut self, file_reference: Reference) {
        if !self.framework_files.contains(&file_reference) {
            self.framework_files.push(file_reference);
        }
    }

    pub fn add_carthage(&mut self, platform_directory: &str, file_reference: Reference) {
        self.carthage
            .entry(platform_directory.to_string())
            .or_default()
            .insert(file_reference);
    }

    pub fn framework_files(&self) -> &[Reference] {
        &self.framework_files
    }

    /// Carthage file references keyed by platform directory name.
    pub fn carthage(&self) -> &BTreeMap<String, BTreeSet<Reference>> {
        &self.carthage
    }
}

/// Embed build files of one target, by destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedBuckets {
    pub extensions: Vec<Reference>,
    pub frameworks: Vec<Reference>,
    pub watch_content: Vec<Reference>,
    pub resources: Vec<Reference>,
}

/// Everything dependency resolution produced for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    pub target_dependencies: Vec<Reference>,
    pub link_files: Vec<Reference>,
    pub embeds: EmbedBuckets,
}

/// `<carthage build path>/<platform dir>`.
pub fn carthage_platform_path(spec: &ProjectSpec, platform: Platform) -> String {
    format!(
        "{}/{}",
        spec.options.carthage_build_path(),
        platform.carthage_directory_name()
    )
}

/// Carthage framework file name; bare names get `.framework`.
pub fn carthage_framework_name(name: &str) -> String {
    if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{name}.framework")
    }
}

pub struct DependencyResolver<'a> {
    spec: &'a ProjectSpec,
    products: &'a ProductIndex,
    project: &'a Reference,
}

impl<'a> DependencyResolver<'a> {
    /// `project` is the reserved project root, used as the container portal
    /// of every target proxy.
    pub fn new(spec: &'a ProjectSpec, products: &'a ProductIndex, project: &'a Reference) -> Self {
        Self {
            spec,
            products,
            project,
        }
    }

    #[instrument(skip_all, fields(target = %target.name))]
    pub fn resolve(
        &self,
        target: &Target,
        graph: &mut ObjectGraph,
        scanner: &mut dyn SourceScanner,
        collector: &mut FrameworkCollector,
    ) -> Result<ResolvedDependencies, GenerationError> {
        let mut resolved = ResolvedDependencies::default();

        for dependency in &target.dependencies {
            let embed = dependency.should_embed(target.target_type);
            match &dependency.kind {
                DependencyKind::Target { name, link } => {
                    self.resolve_target(target, dependency, name, *link, embed, graph, &mut resolved)?;
                }
                DependencyKind::Framework { path, implicit } => {
                    let source_tree = if *implicit {
                        SourceTree::BuildProductsDir
                    } else {
                        SourceTree::Group
                    };
                    let file_reference = scanner.file_reference(
                        graph,
                        Path::new(path),
                        &self.spec.base_path,
                        source_tree,
                    );
                    let context = format!("{file_reference}{}", target.name);
                    let link = graph.add(
                        Object::BuildFile(BuildFile::new(file_reference.clone())),
                        &context,
                    );
                    resolved.link_files.push(link);
                    collector.add_framework(file_reference.clone());

                    if embed {
                        let embed_file = graph.add(
                            Object::BuildFile(BuildFile::with_settings(
                                file_reference,
                                dependency.embed_settings(),
                            )),
                            &context,
                        );
                        resolved.embeds.frameworks.push(embed_file);
                    }
                }
                DependencyKind::Carthage { name } => {
                    let platform_path = carthage_platform_path(self.spec, target.platform);
                    let framework_path =
                        PathBuf::from(&platform_path).join(carthage_framework_name(name));
                    let file_reference = scanner.file_reference(
                        graph,
                        &framework_path,
                        Path::new(&platform_path),
                        SourceTree::Group,
                    );
                    let context = format!("{file_reference}{}", target.name);
                    let link = graph.add(
                        Object::BuildFile(BuildFile::new(file_reference.clone())),
                        &context,
                    );
                    resolved.link_files.push(link);
                    collector.add_carthage(
                        target.platform.carthage_directory_name(),
                        file_reference.clone(),
                    );

                    if target.platform.is_desktop() && target.target_type.is_app() {
                        let embed_file = graph.add(
                            Object::BuildFile(BuildFile::with_settings(
                                file_reference,
                                dependency.embed_settings(),
                            )),
                            &context,
                        );
                        resolved.embeds.frameworks.push(embed_file);
                    }
                }
            }
        }

        debug!(
            dependencies = resolved.target_dependencies.len(),
            links = resolved.link_files.len(),
            "Dependencies resolved"
        );
        Ok(resolved)
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_target(
        &self,
        target: &Target,
        dependency: &Dependency,
        name: &str,
        link: bool,
        embed: bool,
        graph: &mut ObjectGraph,
        resolved: &mut ResolvedDependencies,
    ) -> Result<(), GenerationError> {
        let Some(dependency_target) = self.spec.get_target(name) else {
            if self.spec.options.strict_dependencies {
                return Err(GenerationError::UnknownDependency {
                    target: target.name.clone(),
                    dependency: name.to_string(),
                });
            }
            warn!(dependency = %name, "Skipping dependency on unknown target");
            return Ok(());
        };
        let product = self.products.require(name)?;

        let proxy = graph.add(
            Object::ContainerItemProxy(ContainerItemProxy {
                container_portal: self.project.clone(),
                proxy_type: PROXY_TYPE_NATIVE_TARGET,
                remote_global_id: product.native_target.clone(),
                remote_info: name.to_string(),
            }),
            &target.name,
        );
        let target_dependency = graph.add(
            Object::TargetDependency(TargetDependency {
                target: product.native_target.clone(),
                target_proxy: proxy,
            }),
            &format!("{name}{}", target.name),
        );
        resolved.target_dependencies.push(target_dependency);

        let dependency_type = dependency_target.target_type;
        if (dependency_type.is_library() || dependency_type.is_framework()) && link {
            let link_file = graph.add(
                Object::BuildFile(BuildFile::new(product.file_reference.clone())),
                &format!("{}{}", product.build_file, target.name),
            );
            resolved.link_files.push(link_file);
        }

        if embed && !dependency_type.is_library() {
            let embed_file = graph.add(
                Object::BuildFile(BuildFile::with_settings(
                    product.file_reference.clone(),
                    dependency.embed_settings(),
                )),
                &format!("{}{}", product.file_reference, target.name),
            );

            let bucket = if dependency_type.is_extension() {
                &mut resolved.embeds.extensions
            } else if dependency_type.is_framework() {
                &mut resolved.embeds.frameworks
            } else if dependency_type.is_app() && dependency_target.platform == Platform::WatchOs {
                &mut resolved.embeds.watch_content
            } else {
                &mut resolved.embeds.resources
            };
            bucket.push(embed_file);
        }

        Ok(())
    }
}

/// Every Carthage dependency reachable from `target` through target
/// dependencies.
///
/// Each branch carries its own copy of the visited set. Reaching a target
/// already on the current path ends that call with an empty list, dropping
/// whatever it had collected, so cyclic target graphs terminate.
pub fn carthage_dependencies<'a>(spec: &'a ProjectSpec, target: &'a Target) -> Vec<&'a Dependency> {
    collect_carthage(spec, target, HashSet::new())
}

fn collect_carthage<'a>(
    spec: &'a ProjectSpec,
    target: &'a Target,
    mut visited: HashSet<&'a str>,
) -> Vec<&'a Dependency> {
    visited.insert(target.name.as_str());

    let mut frameworks = Vec::new();
    for dependency in &target.dependencies {
        match &dependency.kind {
            DependencyKind::Carthage { .. } => frameworks.push(dependency),
            DependencyKind::Target { name, .. } => {
                if visited.contains(name.as_str()) {
                    return Vec::new();
                }
                if let Some(dependency_target) = spec.get_target(name) {
                    frameworks.extend(collect_carthage(spec, dependency_target, visited.clone()));
                }
            }
            DependencyKind::Framework { .. } => {}
        }
    }
    frameworks
}

/// Names of the Carthage frameworks `target` embeds through the
/// copy-frameworks script: deduplicated, sorted, `embed: false` excluded.
pub fn carthage_frameworks_to_embed(dependencies: &[&Dependency]) -> Vec<String> {
    dependencies
        .iter()
        .filter(|d| d.embed.unwrap_or(true))
        .filter_map(|d| match &d.kind {
            DependencyKind::Carthage { name } => Some(name.clone()),
            _ => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TargetType;

    fn names(deps: &[&Dependency]) -> Vec<String> {
        deps.iter()
            .filter_map(|d| match &d.kind {
                DependencyKind::Carthage { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn transitive_carthage_dependencies_are_collected() {
        let spec = ProjectSpec::new("P", "/p")
            .with_target(
                Target::new("App", TargetType::Application, Platform::Ios)
                    .with_dependency(Dependency::carthage("Alamofire"))
                    .with_dependency(Dependency::target("Kit")),
            )
            .with_target(
                Target::new("Kit", TargetType::Framework, Platform::Ios)
                    .with_dependency(Dependency::carthage("Result")),
            );
        let app = spec.get_target("App").unwrap();
        assert_eq!(names(&carthage_dependencies(&spec, app)), ["Alamofire", "Result"]);
    }

    #[test]
    fn cycles_yield_an_empty_contribution() {
        let spec = ProjectSpec::new("P", "/p")
            .with_target(
                Target::new("A", TargetType::Framework, Platform::Ios)
                    .with_dependency(Dependency::target("B")),
            )
            .with_target(
                Target::new("B", TargetType::Framework, Platform::Ios)
                    .with_dependency(Dependency::carthage("Result"))
                    .with_dependency(Dependency::target("A")),
            );
        let a = spec.get_target("A").unwrap();
        // B's walk hits A (already visited) and discards "Result".
        assert!(carthage_dependencies(&spec, a).is_empty());
    }

    #[test]
    fn self_dependency_terminates() {
        let spec = ProjectSpec::new("P", "/p").with_target(
            Target::new("A", TargetType::Application, Platform::Ios)
                .with_dependency(Dependency::target("A")),
        );
        let a = spec.get_target("A").unwrap();
        assert!(carthage_dependencies(&spec, a).is_empty());
    }

    #[test]
    fn embed_list_is_deduplicated_sorted_and_filtered() {
        let deps = [
            Dependency::carthage("Result"),
            Dependency::carthage("Alamofire"),
            Dependency::carthage("Result"),
            Dependency::carthage("Hidden").embed(false),
        ];
        let refs: Vec<_> = deps.iter().collect();
        assert_eq!(carthage_frameworks_to_embed(&refs), ["Alamofire", "Result"]);
    }

    #[test]
    fn carthage_names_default_to_framework_bundles() {
        assert_eq!(carthage_framework_name("Alamofire"), "Alamofire.framework");
        assert_eq!(carthage_framework_name("Lib.xcframework"), "Lib.xcframework");
    }

    #[test]
    fn collector_deduplicates_frameworks() {
        let mut collector = FrameworkCollector::new();
        collector.add_framework(Reference::new("FR_A"));
        collector.add_framework(Reference::new("FR_A"));
        collector.add_carthage("iOS", Reference::new("FR_B"));
        collector.add_carthage("iOS", Reference::new("FR_B"));
        assert_eq!(collector.framework_files().len(), 1);
        assert_eq!(collector.carthage()["iOS"].len(), 1);
    }
}
