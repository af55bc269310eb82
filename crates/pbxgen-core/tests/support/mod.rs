//! In-memory `SourceScanner` and graph lookup helpers for integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use pbxgen_core::application::GenerationError;
use pbxgen_core::domain::{BuildSettings, Target};
use pbxgen_core::graph::{
    BuildConfiguration, BuildFile, FileReference, Group, NativeTarget, Object, ObjectGraph,
    ObjectKind, Reference, SourceTree,
};
use pbxgen_core::prelude::*;

pub const BASE: &str = "/project";

/// Scanner backed by declared file lists instead of a file system.
#[derive(Debug, Default)]
pub struct StubScanner {
    /// Target name → files (relative to the base) with their phase.
    sources: HashMap<String, Vec<(String, Option<FilePhase>)>>,
    /// Absolute path → contents.
    files: BTreeMap<PathBuf, String>,
    regions: Vec<String>,
    file_references: HashMap<PathBuf, Reference>,
    roots: Vec<Reference>,
}

impl StubScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(mut self, target: &str, files: &[(&str, Option<FilePhase>)]) -> Self {
        self.sources.insert(
            target.to_string(),
            files.iter().map(|(p, phase)| (p.to_string(), *phase)).collect(),
        );
        self
    }

    /// A readable file, path relative to the base.
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files
            .insert(Path::new(BASE).join(path), contents.to_string());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.regions.push(region.to_string());
        self
    }

    pub fn boxed(self) -> Box<dyn SourceScanner> {
        Box::new(self)
    }
}

impl SourceScanner for StubScanner {
    fn file_group(&mut self, graph: &mut ObjectGraph, path: &Path) -> CoreResult<Reference> {
        let relative = path.strip_prefix(BASE).unwrap_or(path);
        let group = graph.add(
            Object::Group(Group::new(Vec::new()).with_path(relative.to_string_lossy())),
            &relative.to_string_lossy(),
        );
        self.roots.push(group.clone());
        Ok(group)
    }

    fn source_files(
        &mut self,
        graph: &mut ObjectGraph,
        target: &Target,
    ) -> CoreResult<Vec<SourceFile>> {
        let declared = self.sources.get(&target.name).cloned().unwrap_or_default();
        let mut files = Vec::new();
        let mut children = Vec::new();
        for (path, phase) in declared {
            let absolute = Path::new(BASE).join(&path);
            let file_reference =
                self.file_reference(graph, &absolute, Path::new(BASE), SourceTree::Group);
            children.push(file_reference.clone());
            let reference = graph.reserve(
                ObjectKind::BuildFile,
                &format!("{file_reference}{}", target.name),
            );
            files.push(SourceFile {
                path: absolute,
                build_file: BuildFile::new(file_reference.clone()),
                file_reference,
                reference,
                phase,
            });
        }
        if !children.is_empty() {
            let group = graph.add(
                Object::Group(Group::new(children).with_path(target.name.as_str())),
                &target.name,
            );
            self.roots.push(group);
        }
        Ok(files)
    }

    fn file_reference(
        &mut self,
        graph: &mut ObjectGraph,
        path: &Path,
        in_path: &Path,
        source_tree: SourceTree,
    ) -> Reference {
        if let Some(existing) = self.file_references.get(path) {
            return existing.clone();
        }
        let relative = path
            .strip_prefix(in_path)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        let reference = graph.add(
            Object::FileReference(FileReference::new(relative, source_tree)),
            &path.to_string_lossy(),
        );
        self.file_references
            .insert(path.to_path_buf(), reference.clone());
        reference
    }

    fn contained_file_reference(&mut self, graph: &mut ObjectGraph, path: &Path) -> Reference {
        let reference = self.file_reference(graph, path, Path::new(BASE), SourceTree::Group);
        if !self.roots.contains(&reference) {
            self.roots.push(reference.clone());
        }
        reference
    }

    fn root_groups(&mut self, _graph: &mut ObjectGraph) -> CoreResult<Vec<Reference>> {
        Ok(self.roots.clone())
    }

    fn known_regions(&self) -> Vec<String> {
        self.regions.clone()
    }

    fn find_files(&self, path: &Path, file_name: &str) -> Vec<PathBuf> {
        self.files
            .keys()
            .filter(|p| p.starts_with(path))
            .filter(|p| p.file_name().is_some_and(|n| n == file_name))
            .cloned()
            .collect()
    }

    fn read_file(&self, path: &Path) -> CoreResult<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            GenerationError::Io {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }
}

pub fn generate(spec: ProjectSpec, scanner: StubScanner) -> GeneratedProject {
    ProjectGenerator::new(spec, scanner.boxed(), GeneratorOptions::default())
        .generate()
        .expect("generation succeeds")
}

pub fn try_generate(spec: ProjectSpec, scanner: StubScanner) -> CoreResult<GeneratedProject> {
    ProjectGenerator::new(spec, scanner.boxed(), GeneratorOptions::default()).generate()
}

pub fn native_target<'a>(graph: &'a ObjectGraph, name: &str) -> &'a NativeTarget {
    graph
        .of_kind(ObjectKind::NativeTarget)
        .filter_map(|(_, o)| o.as_native_target())
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("no native target {name}"))
}

/// Phases of a target, in build order.
pub fn phases<'a>(graph: &'a ObjectGraph, target: &str) -> Vec<&'a Object> {
    native_target(graph, target)
        .build_phases
        .iter()
        .map(|r| graph.require(r).expect("phase exists"))
        .collect()
}

pub fn phase_kinds(graph: &ObjectGraph, target: &str) -> Vec<ObjectKind> {
    phases(graph, target).iter().map(|p| p.kind()).collect()
}

/// Paths of the files a phase lists, via build file → file reference.
pub fn phase_paths(graph: &ObjectGraph, phase: &Object) -> Vec<String> {
    phase
        .phase_files()
        .expect("object is a phase")
        .iter()
        .map(|r| {
            let build_file = graph.require(r).unwrap().as_build_file().unwrap();
            graph
                .require(&build_file.file_ref)
                .unwrap()
                .as_file_reference()
                .unwrap()
                .path
                .clone()
        })
        .collect()
}

pub fn configuration<'a>(
    graph: &'a ObjectGraph,
    target: &str,
    config: &str,
) -> &'a BuildConfiguration {
    let list = &native_target(graph, target).build_configuration_list;
    let Some(Object::ConfigurationList(list)) = graph.get(list) else {
        panic!("target {target} has no configuration list");
    };
    list.build_configurations
        .iter()
        .filter_map(|r| graph.get(r)?.as_build_configuration())
        .find(|c| c.name == config)
        .unwrap_or_else(|| panic!("no configuration {config} on {target}"))
}

pub fn settings<'a>(graph: &'a ObjectGraph, target: &str, config: &str) -> &'a BuildSettings {
    &configuration(graph, target, config).build_settings
}

/// File references whose path is `path`.
pub fn file_references<'a>(graph: &'a ObjectGraph, path: &str) -> Vec<&'a Reference> {
    graph
        .of_kind(ObjectKind::FileReference)
        .filter(|(_, o)| o.as_file_reference().is_some_and(|f| f.path == path))
        .map(|(r, _)| r)
        .collect()
}

/// Build files pointing at `file_ref`.
pub fn build_files_for<'a>(graph: &'a ObjectGraph, file_ref: &Reference) -> Vec<&'a BuildFile> {
    graph
        .of_kind(ObjectKind::BuildFile)
        .filter_map(|(_, o)| o.as_build_file())
        .filter(|b| &b.file_ref == file_ref)
        .collect()
}

/// `owner -> target` for every link that names no object in the graph.
pub fn dangling_links(graph: &ObjectGraph) -> Vec<String> {
    graph
        .iter()
        .flat_map(|(owner, object)| {
            object
                .references()
                .into_iter()
                .filter(|r| !graph.contains(r))
                .map(move |r| format!("{owner} -> {r}"))
        })
        .collect()
}
