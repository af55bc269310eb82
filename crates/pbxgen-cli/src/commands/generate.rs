//! `pbxgen generate`: write `<Name>.xcodeproj/project.pbxproj`.

use std::path::PathBuf;

use serde_json::json;
use tracing::{info, instrument};

use pbxgen_adapters::PbxprojWriter;
use pbxgen_core::prelude::ProjectWriter;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::OutputManager;

#[instrument(skip_all, fields(manifest = %args.manifest.manifest.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let super::Built { project, base_path } = super::build_project(&args.manifest, &config)?;
    let output_dir = resolve_output_dir(&args, &config, base_path);
    let writer = PbxprojWriter::new();

    if args.dry_run {
        let rendered = writer.render(&project)?;
        output.info(&format!(
            "Dry run: would write {}",
            PbxprojWriter::project_dir(&project, &output_dir).display()
        ))?;
        output.data(&rendered)?;
        return Ok(());
    }

    let path = writer.write(&project, &output_dir)?;
    info!(path = %path.display(), "Project generated");

    if output.format() == OutputFormat::Json {
        output.json(
            &json!({
                "project": project.name,
                "path": path,
                "objects": project.graph.len(),
            }),
            false,
        )?;
    } else {
        output.success(&format!(
            "Generated {} ({} objects)",
            path.display(),
            project.graph.len()
        ))?;
    }
    Ok(())
}

/// `--output`, then `defaults.output_dir`, then the manifest's directory.
fn resolve_output_dir(args: &GenerateArgs, config: &AppConfig, base_path: PathBuf) -> PathBuf {
    args.output
        .clone()
        .or_else(|| config.defaults.output_dir.clone())
        .unwrap_or(base_path)
}
