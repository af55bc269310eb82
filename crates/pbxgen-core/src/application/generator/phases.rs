//! Build phase assembly for one target.

use tracing::{debug, instrument};

use crate::application::{
    GenerationError,
    generator::dependencies::{ResolvedDependencies, carthage_framework_name, carthage_platform_path},
    ports::{FilePhase, SourceFile, SourceScanner},
};
use crate::domain::{BuildScript, ProjectSpec, ScriptSource, Target};
use crate::graph::{
    CopyFilesBuildPhase, DEFAULT_BUILD_ACTION_MASK, FilesBuildPhase, Object, ObjectGraph,
    Reference, ShellScriptBuildPhase, SubfolderSpec,
};

pub const DEFAULT_SCRIPT_NAME: &str = "Run Script";
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Inputs gathered for a target before its phases are built.
#[derive(Debug, Default)]
pub struct PhaseInputs {
    pub source_files: Vec<SourceFile>,
    pub dependencies: ResolvedDependencies,
    /// Carthage frameworks for the copy-frameworks script, sorted.
    pub carthage_frameworks: Vec<String>,
}

pub struct PhaseAssembler<'a> {
    spec: &'a ProjectSpec,
}

impl<'a> PhaseAssembler<'a> {
    pub fn new(spec: &'a ProjectSpec) -> Self {
        Self { spec }
    }

    /// Emit every non-empty phase of `target` in build order and return their
    /// references.
    #[instrument(skip_all, fields(target = %target.name))]
    pub fn assemble(
        &self,
        target: &Target,
        graph: &mut ObjectGraph,
        scanner: &dyn SourceScanner,
        inputs: PhaseInputs,
    ) -> Result<Vec<Reference>, GenerationError> {
        let PhaseInputs {
            source_files,
            dependencies,
            carthage_frameworks,
        } = inputs;
        let mut phases = Vec::new();

        for script in &target.prebuild_scripts {
            phases.push(self.script_phase(target, script, graph, scanner)?);
        }

        let sources = register_files(graph, &source_files, FilePhase::Sources)?;
        if !sources.is_empty() {
            phases.push(graph.add(
                Object::SourcesBuildPhase(FilesBuildPhase::new(sources)),
                &target.name,
            ));
        }

        let mut resources = register_files(graph, &source_files, FilePhase::Resources)?;
        resources.extend(dependencies.embeds.resources);
        if !resources.is_empty() {
            phases.push(graph.add(
                Object::ResourcesBuildPhase(FilesBuildPhase::new(resources)),
                &target.name,
            ));
        }

        if target.target_type.has_headers_phase() {
            let headers = register_files(graph, &source_files, FilePhase::Headers)?;
            if !headers.is_empty() {
                phases.push(graph.add(
                    Object::HeadersBuildPhase(FilesBuildPhase::new(headers)),
                    &target.name,
                ));
            }
        }

        if !dependencies.link_files.is_empty() {
            phases.push(graph.add(
                Object::FrameworksBuildPhase(FilesBuildPhase::new(dependencies.link_files)),
                &target.name,
            ));
        }

        let copy_phases = [
            (
                "Embed App Extensions",
                "embed app extensions",
                SubfolderSpec::Plugins,
                "",
                dependencies.embeds.extensions,
            ),
            (
                "Embed Frameworks",
                "embed frameworks",
                SubfolderSpec::Frameworks,
                "",
                dependencies.embeds.frameworks,
            ),
            (
                "Embed Watch Content",
                "embed watch content",
                SubfolderSpec::ProductsDirectory,
                "$(CONTENTS_FOLDER_PATH)/Watch",
                dependencies.embeds.watch_content,
            ),
        ];
        for (name, context, subfolder, dst_path, files) in copy_phases {
            if files.is_empty() {
                continue;
            }
            phases.push(graph.add(
                Object::CopyFilesBuildPhase(CopyFilesBuildPhase {
                    build_action_mask: DEFAULT_BUILD_ACTION_MASK,
                    dst_path: dst_path.to_string(),
                    dst_subfolder_spec: subfolder,
                    files,
                    name: Some(name.to_string()),
                    run_only_for_deployment_postprocessing: 0,
                }),
                &format!("{context}{}", target.name),
            ));
        }

        if !carthage_frameworks.is_empty()
            && target.target_type.is_app()
            && !target.platform.is_desktop()
        {
            phases.push(self.carthage_phase(target, &carthage_frameworks, graph));
        }

        for script in &target.postbuild_scripts {
            phases.push(self.script_phase(target, script, graph, scanner)?);
        }

        debug!(phases = phases.len(), "Build phases assembled");
        Ok(phases)
    }

    fn script_phase(
        &self,
        target: &Target,
        script: &BuildScript,
        graph: &mut ObjectGraph,
        scanner: &dyn SourceScanner,
    ) -> Result<Reference, GenerationError> {
        let body = match &script.script {
            ScriptSource::Inline(body) => body.clone(),
            ScriptSource::Path(path) => {
                let path = self.spec.base_path.join(path);
                scanner
                    .read_file(&path)
                    .map_err(|_| GenerationError::ScriptNotFound {
                        path,
                        target: target.name.clone(),
                    })?
            }
        };

        let context = format!("{:?}{body}{}", script.name, target.name);
        let phase = ShellScriptBuildPhase {
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files: Vec::new(),
            input_paths: script.input_files.clone(),
            name: script
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_SCRIPT_NAME.to_string()),
            output_paths: script.output_files.clone(),
            run_only_for_deployment_postprocessing: u8::from(script.run_only_when_installing),
            shell_path: script
                .shell
                .clone()
                .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            shell_script: body,
        };
        Ok(graph.add(Object::ShellScriptBuildPhase(phase), &context))
    }

    fn carthage_phase(
        &self,
        target: &Target,
        frameworks: &[String],
        graph: &mut ObjectGraph,
    ) -> Reference {
        let platform_path = carthage_platform_path(self.spec, target.platform);
        let (input_paths, output_paths): (Vec<String>, Vec<String>) = frameworks
            .iter()
            .map(|name| {
                let file = carthage_framework_name(name);
                (
                    format!("$(SRCROOT)/{platform_path}/{file}"),
                    format!("$(BUILT_PRODUCTS_DIR)/$(FRAMEWORKS_FOLDER_PATH)/{file}"),
                )
            })
            .unzip();

        let phase = ShellScriptBuildPhase {
            build_action_mask: DEFAULT_BUILD_ACTION_MASK,
            files: Vec::new(),
            input_paths,
            name: "Carthage".to_string(),
            output_paths,
            run_only_for_deployment_postprocessing: 0,
            shell_path: DEFAULT_SHELL.to_string(),
            shell_script: format!(
                "{} copy-frameworks\n",
                self.spec.options.carthage_executable_path()
            ),
        };
        graph.add(
            Object::ShellScriptBuildPhase(phase),
            &format!("Carthage{}", target.name),
        )
    }
}

/// Insert the build files of every source file in `phase`, ordered by file
/// name, and return their references.
fn register_files(
    graph: &mut ObjectGraph,
    source_files: &[SourceFile],
    phase: FilePhase,
) -> Result<Vec<Reference>, GenerationError> {
    let mut files: Vec<&SourceFile> = source_files
        .iter()
        .filter(|f| f.phase == Some(phase))
        .collect();
    files.sort_by(|a, b| a.base_name().cmp(b.base_name()));

    let mut references = Vec::with_capacity(files.len());
    for file in files {
        graph.insert(file.reference.clone(), Object::BuildFile(file.build_file.clone()))?;
        references.push(file.reference.clone());
    }
    Ok(references)
}
