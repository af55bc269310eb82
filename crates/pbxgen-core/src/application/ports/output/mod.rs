//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the generator needs from external systems.
//! The `pbxgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::GeneratedProject;
use crate::domain::Target;
use crate::error::CoreResult;
use crate::graph::{BuildFile, ObjectGraph, Reference, SourceTree};

/// Build phase a scanned file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilePhase {
    Sources,
    Resources,
    Headers,
}

/// One file discovered under a target's sources.
///
/// The file element is already in the graph; the build file is not. Its
/// reference is reserved so the phase assembler can insert it when the phase
/// is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_reference: Reference,
    pub build_file: BuildFile,
    pub reference: Reference,
    /// `None` for files that belong to no phase (e.g. `Info.plist`).
    pub phase: Option<FilePhase>,
}

impl SourceFile {
    /// File name used to order files inside a phase.
    pub fn base_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Port for turning file system paths into file elements.
///
/// Implemented by:
/// - `pbxgen_adapters::scanner::LocalSourceScanner` (real file system)
///
/// Every file element the scanner creates goes into the graph passed to the
/// call. Implementations cache file references by path, so resolving the same
/// path twice yields the same reference.
pub trait SourceScanner {
    /// Scan a declared file group into the project tree.
    fn file_group(&mut self, graph: &mut ObjectGraph, path: &Path) -> CoreResult<Reference>;

    /// Scan every source root of `target`.
    fn source_files(&mut self, graph: &mut ObjectGraph, target: &Target)
    -> CoreResult<Vec<SourceFile>>;

    /// File reference for `path`, stored relative to `in_path`.
    fn file_reference(
        &mut self,
        graph: &mut ObjectGraph,
        path: &Path,
        in_path: &Path,
        source_tree: SourceTree,
    ) -> Reference;

    /// File reference for `path` placed inside the group of its directory,
    /// or directly in the main group when that directory is the base path.
    fn contained_file_reference(&mut self, graph: &mut ObjectGraph, path: &Path) -> Reference;

    /// Insert every group the scanner has reserved and return the top-level
    /// elements of the main group. Called once, after all scanning.
    fn root_groups(&mut self, graph: &mut ObjectGraph) -> CoreResult<Vec<Reference>>;

    /// Localization regions seen while scanning.
    fn known_regions(&self) -> Vec<String>;

    /// Files named `file_name` at or below `path`, in a stable order.
    fn find_files(&self, path: &Path, file_name: &str) -> Vec<PathBuf>;

    /// Read a text file (build scripts, `.xcconfig` files).
    fn read_file(&self, path: &Path) -> CoreResult<String>;
}

/// Port for persisting a generated project.
///
/// Implemented by:
/// - `pbxgen_adapters::writer::PbxprojWriter` (OpenStep `project.pbxproj`)
pub trait ProjectWriter {
    /// Write `project` below `output_dir`, returning the path of the bundle
    /// that was written.
    fn write(&self, project: &GeneratedProject, output_dir: &Path) -> CoreResult<PathBuf>;
}
