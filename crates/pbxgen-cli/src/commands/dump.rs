//! `pbxgen dump`: print the generated object graph as JSON.

use tracing::instrument;

use crate::cli::DumpArgs;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::OutputManager;

#[instrument(skip_all, fields(manifest = %args.manifest.manifest.display()))]
pub fn execute(args: DumpArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let built = super::build_project(&args.manifest, &config)?;
    output.json(&built.project.graph, !args.compact)?;
    Ok(())
}
