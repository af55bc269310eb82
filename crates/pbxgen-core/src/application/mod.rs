//! Application layer for pbxgen.
//!
//! This layer contains:
//! - **Generator**: the `ProjectGenerator` orchestrator and its components
//!   (settings, dependencies, phases, groups)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Generation-specific error types
//!
//! The application layer compiles the domain model into the object graph in
//! `crate::graph`. Spec model rules live in `crate::domain`.

pub mod error;
pub mod generator;
pub mod ports;

pub use generator::{GeneratedProject, GeneratorOptions, ProjectGenerator};

// Re-export port traits (for adapter implementation)
pub use ports::{FilePhase, ProjectWriter, SourceFile, SourceScanner};

pub use error::GenerationError;
