//! Application layer errors.
//!
//! These errors represent failures while compiling a spec into a graph.
//! Spec model violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;
use crate::graph::GraphError;

/// Errors that occur during graph generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    /// `generate` was called a second time on the same generator.
    #[error("Project generator was already used; create a new generator for each run")]
    AlreadyGenerated,

    /// A target dependency names a target the spec does not declare
    /// (strict dependency mode only).
    #[error("Target '{target}' depends on unknown target '{dependency}'")]
    UnknownDependency { target: String, dependency: String },

    /// A build script declared by path could not be read.
    #[error("Build script {path} for target '{target}' could not be read")]
    ScriptNotFound { path: PathBuf, target: String },

    /// A known target has no product file reference registered.
    #[error("No product registered for target '{target}'")]
    MissingProduct { target: String },

    /// Object graph invariant violated.
    #[error("Object graph error: {0}")]
    Graph(#[from] GraphError),

    /// Filesystem access through a port failed.
    #[error("I/O error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl GenerationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyGenerated => vec![
                "A ProjectGenerator produces exactly one graph".into(),
                "Construct a new generator to generate again".into(),
            ],
            Self::UnknownDependency { dependency, .. } => vec![
                format!("Declare a target named '{}' or remove the dependency", dependency),
                "Disable strictDependencies to skip unknown targets with a warning".into(),
            ],
            Self::ScriptNotFound { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Script paths are relative to the project spec directory".into(),
            ],
            Self::Io { path, .. } => vec![format!("Failed to access: {}", path.display())],
            Self::MissingProduct { .. } | Self::Graph(_) => vec![
                "This appears to be a bug in pbxgen".into(),
                "Run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyGenerated => ErrorCategory::Contract,
            Self::UnknownDependency { .. } => ErrorCategory::Validation,
            Self::ScriptNotFound { .. } => ErrorCategory::NotFound,
            Self::Io { .. } | Self::MissingProduct { .. } | Self::Graph(_) => {
                ErrorCategory::Internal
            }
        }
    }
}
