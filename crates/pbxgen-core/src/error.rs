//! Unified error handling for pbxgen core.
//!
//! This module provides a unified error type that wraps domain and generation
//! errors, plus the failures reported by spec loaders and project writers.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::GenerationError;
use crate::domain::DomainError;
use crate::graph::GraphError;

/// Root error type for pbxgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Errors from the domain layer (spec model violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from graph generation.
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// A project manifest could not be read or parsed.
    #[error("Failed to load manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// The generated project could not be written.
    #[error("Failed to write {path}: {reason}")]
    Output { path: PathBuf, reason: String },
}

impl CoreError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Generation(e) => e.suggestions(),
            Self::Manifest { path, .. } => vec![
                format!("Check the syntax of {}", path.display()),
                "Supported manifest formats: .yml, .yaml, .json, .toml".into(),
            ],
            Self::Output { path, .. } => vec![
                format!("Check that you can write to {}", path.display()),
                "Use --output to choose another directory".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) | Self::Manifest { .. } => ErrorCategory::Validation,
            Self::Generation(e) => e.category(),
            Self::Output { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<GraphError> for CoreError {
    fn from(e: GraphError) -> Self {
        Self::Generation(GenerationError::Graph(e))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// API misuse by the caller.
    Contract,
    Internal,
}

/// Convenient result type alias.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Reference;

    #[test]
    fn generation_errors_keep_their_category() {
        let err: CoreError = GenerationError::AlreadyGenerated.into();
        assert_eq!(err.category(), ErrorCategory::Contract);

        let err: CoreError = GenerationError::from(GraphError::ObjectNotFound {
            reference: Reference::new("G_1"),
        })
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: CoreError = DomainError::UnknownPlatform("linux".into()).into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
