//! Command handlers.
//!
//! `generate` and `dump` share [`build_project`]: load the manifest, scan the
//! file system and run the generator once.

use std::path::PathBuf;

use tracing::{debug, instrument};

use pbxgen_adapters::{LocalSourceScanner, ManifestFormat, SpecLoader};
use pbxgen_core::prelude::*;

use crate::cli::ManifestArgs;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub mod completions;
pub mod config;
pub mod dump;
pub mod generate;

/// A generated project and the directory its manifest lives in.
pub struct Built {
    pub project: GeneratedProject,
    pub base_path: PathBuf,
}

/// Manifest → [`ProjectSpec`] → [`GeneratedProject`].
#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn build_project(args: &ManifestArgs, config: &AppConfig) -> CliResult<Built> {
    if !args.manifest.is_file() {
        return Err(CliError::ManifestNotFound {
            path: args.manifest.clone(),
        });
    }
    if ManifestFormat::from_path(&args.manifest).is_none() {
        return Err(CliError::InvalidInput {
            message: format!(
                "'{}' is not a .yml, .yaml, .json or .toml manifest",
                args.manifest.display()
            ),
        });
    }

    let mut spec = SpecLoader::new(&args.manifest).load()?;
    if args.strict {
        spec.options.strict_dependencies = true;
    }
    debug!(
        project = %spec.name,
        targets = spec.targets.len(),
        base = %spec.base_path.display(),
        "Manifest loaded"
    );

    let options = GeneratorOptions {
        xcode_version: args
            .xcode_version
            .clone()
            .unwrap_or_else(|| config.xcode_version.clone()),
    };
    let base_path = spec.base_path.clone();
    let scanner = LocalSourceScanner::new(base_path.clone());
    let project = ProjectGenerator::new(spec, Box::new(scanner), options).generate()?;
    Ok(Built { project, base_path })
}
