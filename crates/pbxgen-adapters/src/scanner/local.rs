//! Local file system scanner built on `walkdir`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use pbxgen_core::application::GenerationError;
use pbxgen_core::application::ports::{FilePhase, SourceFile, SourceScanner};
use pbxgen_core::domain::{BuildSettings, SettingValue, Target, TargetSource};
use pbxgen_core::error::CoreResult;
use pbxgen_core::graph::{
    BuildFile, FileReference, Group, Object, ObjectGraph, ObjectKind, Reference, SourceTree,
};

use super::file_types::{default_phase, is_bundle_directory, last_known_file_type};

const LOCALIZED_EXTENSION: &str = "lproj";

/// A buildable element found while scanning a directory: a file, an opaque
/// bundle directory or a localized variant group.
#[derive(Debug, Clone)]
struct Element {
    path: PathBuf,
    reference: Reference,
}

/// A directory that becomes a group. The reference is reserved when the
/// directory is first seen; the group itself is built by `root_groups` once
/// every directory is known.
#[derive(Debug)]
struct DirectoryNode {
    reference: Reference,
    /// Files and variant groups directly inside the directory.
    children: Vec<Reference>,
}

/// Production [`SourceScanner`] reading the real file system.
///
/// Directories are scanned once and file references created once per path,
/// so targets sharing a directory share its elements. A directory group is
/// nested in its parent directory's group whenever that parent is a group
/// too, which keeps overlapping source roots in a single tree.
#[derive(Debug)]
pub struct LocalSourceScanner {
    base_path: PathBuf,
    file_references: HashMap<PathBuf, Reference>,
    /// Buildable elements at or below each scanned directory.
    scanned: HashMap<PathBuf, Vec<Element>>,
    directories: BTreeMap<PathBuf, DirectoryNode>,
    /// Files placed directly in the main group.
    root_files: Vec<Reference>,
    known_regions: BTreeSet<String>,
}

impl LocalSourceScanner {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            file_references: HashMap::new(),
            scanned: HashMap::new(),
            directories: BTreeMap::new(),
            root_files: Vec::new(),
            known_regions: BTreeSet::new(),
        }
    }

    fn directory(&mut self, graph: &mut ObjectGraph, dir: &Path) -> &mut DirectoryNode {
        self.directories
            .entry(dir.to_path_buf())
            .or_insert_with(|| DirectoryNode {
                reference: graph.reserve(ObjectKind::Group, &dir.to_string_lossy()),
                children: Vec::new(),
            })
    }

    fn add_child(&mut self, graph: &mut ObjectGraph, dir: &Path, reference: &Reference) {
        let node = self.directory(graph, dir);
        if !node.children.contains(reference) {
            node.children.push(reference.clone());
        }
    }

    /// Buildable elements at or below `dir`. `root` is the source root
    /// `excludes` are relative to.
    fn scan_directory(
        &mut self,
        graph: &mut ObjectGraph,
        dir: &Path,
        root: &Path,
        excludes: &[String],
    ) -> CoreResult<Vec<Element>> {
        if let Some(cached) = self.scanned.get(dir) {
            return Ok(cached.clone());
        }
        self.directory(graph, dir);

        let mut elements = Vec::new();
        // File name → localized file references, across every `.lproj`.
        let mut variants: BTreeMap<String, Vec<Reference>> = BTreeMap::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| io_error(dir, e.to_string()))?;
            let path = entry.path();
            if is_hidden(path) || is_excluded(path, root, excludes) {
                continue;
            }

            let is_dir = entry.file_type().is_dir();
            if is_dir && has_extension(path, LOCALIZED_EXTENSION) {
                self.scan_localized(graph, path, dir, &mut variants)?;
            } else if is_dir && !is_bundle_directory(path) {
                elements.extend(self.scan_directory(graph, path, root, excludes)?);
            } else {
                let reference = self.file_reference(graph, path, dir, SourceTree::Group);
                self.add_child(graph, dir, &reference);
                elements.push(Element {
                    path: path.to_path_buf(),
                    reference,
                });
            }
        }

        for (file_name, localized) in variants {
            let variant_path = dir.join(&file_name);
            let reference = graph.add(
                Object::VariantGroup(Group::new(localized).named(file_name)),
                &variant_path.to_string_lossy(),
            );
            self.add_child(graph, dir, &reference);
            elements.push(Element {
                path: variant_path,
                reference,
            });
        }

        self.scanned.insert(dir.to_path_buf(), elements.clone());
        Ok(elements)
    }

    /// File references for every file inside one `.lproj` directory, recorded
    /// under their file name in `variants`.
    fn scan_localized(
        &mut self,
        graph: &mut ObjectGraph,
        lproj: &Path,
        parent: &Path,
        variants: &mut BTreeMap<String, Vec<Reference>>,
    ) -> CoreResult<()> {
        let region = lproj
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.known_regions.insert(region.clone());

        for entry in WalkDir::new(lproj)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| io_error(lproj, e.to_string()))?;
            let path = entry.path();
            if is_hidden(path) {
                continue;
            }
            let reference = match self.file_references.get(path) {
                Some(existing) => existing.clone(),
                None => {
                    let mut file = FileReference::new(
                        relative_path(path, parent),
                        SourceTree::Group,
                    );
                    file.name = Some(region.clone());
                    file.last_known_file_type = last_known_file_type(path).map(str::to_string);
                    let reference = graph.add(Object::FileReference(file), &path.to_string_lossy());
                    self.file_references
                        .insert(path.to_path_buf(), reference.clone());
                    reference
                }
            };
            variants
                .entry(file_name(path))
                .or_default()
                .push(reference);
        }
        Ok(())
    }

    fn source_file(
        &self,
        graph: &mut ObjectGraph,
        target: &Target,
        source: &TargetSource,
        element: Element,
    ) -> SourceFile {
        let phase = default_phase(&element.path);
        let mut settings = BuildSettings::new();
        if phase == Some(FilePhase::Sources)
            && !source.compiler_flags.is_empty()
        {
            settings.insert(
                "COMPILER_FLAGS".into(),
                SettingValue::from(source.compiler_flags.join(" ")),
            );
        }

        let reference = graph.reserve(
            ObjectKind::BuildFile,
            &format!("{}{}", element.reference, target.name),
        );
        SourceFile {
            path: element.path,
            build_file: BuildFile::with_settings(element.reference.clone(), settings),
            file_reference: element.reference,
            reference,
            phase,
        }
    }
}

impl SourceScanner for LocalSourceScanner {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn file_group(&mut self, graph: &mut ObjectGraph, path: &Path) -> CoreResult<Reference> {
        if path.is_dir() {
            self.scan_directory(graph, path, path, &[])?;
            Ok(self.directory(graph, path).reference.clone())
        } else {
            Ok(self.contained_file_reference(graph, path))
        }
    }

    #[instrument(skip_all, fields(target = %target.name))]
    fn source_files(
        &mut self,
        graph: &mut ObjectGraph,
        target: &Target,
    ) -> CoreResult<Vec<SourceFile>> {
        let mut files = Vec::new();

        for source in &target.sources {
            let path = self.base_path.join(&source.path);
            let elements = if path.is_dir() && !is_bundle_directory(&path) {
                self.scan_directory(graph, &path, &path, &source.excludes)?
            } else if path.exists() {
                let reference = self.contained_file_reference(graph, &path);
                vec![Element { path, reference }]
            } else {
                warn!(source = %source.path, "Source path does not exist");
                continue;
            };

            for element in elements {
                files.push(self.source_file(graph, target, source, element));
            }
        }

        debug!(files = files.len(), "Sources scanned");
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

        let mut file = FileReference::new(relative_path(path, in_path), source_tree);
        file.last_known_file_type = last_known_file_type(path).map(str::to_string);
        let reference = graph.add(Object::FileReference(file), &path.to_string_lossy());
        self.file_references
            .insert(path.to_path_buf(), reference.clone());
        reference
    }

    fn contained_file_reference(&mut self, graph: &mut ObjectGraph, path: &Path) -> Reference {
        let parent = path
            .parent()
            .map_or_else(|| self.base_path.clone(), Path::to_path_buf);
        let reference = self.file_reference(graph, path, &parent, SourceTree::Group);
        if parent == self.base_path {
            if !self.root_files.contains(&reference) {
                self.root_files.push(reference.clone());
            }
        } else {
            self.add_child(graph, &parent, &reference);
        }
        reference
    }

    fn root_groups(&mut self, graph: &mut ObjectGraph) -> CoreResult<Vec<Reference>> {
        let is_nested =
            |dir: &Path| dir.parent().is_some_and(|p| self.directories.contains_key(p));

        let mut subgroups: HashMap<&Path, Vec<Reference>> = HashMap::new();
        let mut roots = Vec::new();
        for (dir, node) in &self.directories {
            match dir.parent().filter(|_| is_nested(dir)) {
                Some(parent) => subgroups
                    .entry(parent)
                    .or_default()
                    .push(node.reference.clone()),
                None => roots.push(node.reference.clone()),
            }
        }

        for (dir, node) in &self.directories {
            let mut children = subgroups.remove(dir.as_path()).unwrap_or_default();
            children.extend(node.children.iter().cloned());

            let mut group = Group::new(children);
            if is_nested(dir) {
                group = group.with_path(file_name(dir));
            } else {
                let relative = relative_path(dir, &self.base_path);
                if let Some(name) = dir.file_name().filter(|n| Path::new(n) != Path::new(&relative)) {
                    group = group.named(name.to_string_lossy());
                }
                group = group.with_path(relative);
            }
            graph.insert(node.reference.clone(), Object::Group(group))?;
        }

        roots.extend(self.root_files.iter().cloned());
        debug!(groups = self.directories.len(), roots = roots.len(), "Group tree built");
        Ok(roots)
    }

    fn known_regions(&self) -> Vec<String> {
        self.known_regions.iter().cloned().collect()
    }

    fn find_files(&self, path: &Path, file_name: &str) -> Vec<PathBuf> {
        WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && e.file_name() == file_name)
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn read_file(&self, path: &Path) -> CoreResult<String> {
        fs::read_to_string(path).map_err(|e| io_error(path, e.to_string()))
    }
}

fn io_error(path: &Path, reason: String) -> pbxgen_core::error::CoreError {
    GenerationError::Io {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

fn relative_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|e| e == extension)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

/// `*.ext`-style patterns match file names; anything else matches a path
/// relative to the source root or one of its ancestors.
fn is_excluded(path: &Path, root: &Path, excludes: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    excludes.iter().any(|pattern| match pattern.strip_prefix('*') {
        Some(suffix) => relative.to_string_lossy().ends_with(suffix),
        None => relative.starts_with(pattern),
    })
}
