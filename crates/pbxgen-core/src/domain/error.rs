// ============================================================================
// domain/error.rs - SPEC MODEL ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Raised while building the in-memory project spec, before any graph
/// generation starts. All errors are cloneable and categorizable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project spec: {0}")]
    InvalidSpec(String),

    #[error("Unknown target type '{0}'")]
    UnknownTargetType(String),

    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("Invalid dependency on target '{target}': {reason}")]
    InvalidDependency { target: String, reason: String },

    #[error("Invalid build script on target '{target}': {reason}")]
    InvalidBuildScript { target: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSpec(msg) => vec![
                "Check your project spec".into(),
                format!("Details: {}", msg),
            ],
            Self::UnknownTargetType(ty) => vec![
                format!("'{}' is not a known target type", ty),
                "Common types: application, framework, library.static, library.dynamic,".into(),
                "  bundle.unit-test, bundle.ui-testing, app-extension, tool".into(),
            ],
            Self::UnknownPlatform(platform) => vec![
                format!("'{}' is not a known platform", platform),
                "Supported platforms: iOS, macOS, tvOS, watchOS".into(),
            ],
            Self::InvalidDependency { .. } => vec![
                "Each dependency needs exactly one of: target, framework, carthage".into(),
            ],
            Self::InvalidBuildScript { .. } => vec![
                "Each build script needs exactly one of: path, script".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Add the '{}' field to your project spec", field)]
            }
        }
    }
}
