//! pbxgen Core - Hexagonal Architecture Implementation
//!
//! This crate compiles a normalized project spec into the object graph of an
//! Xcode `project.pbxproj`, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pbxgen-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        ProjectGenerator (one run)       │
//! │  settings · dependencies · phases ·     │
//! │  groups → ObjectGraph                   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (SourceScanner, ProjectWriter)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     pbxgen-adapters (Infrastructure)    │
//! │ (LocalSourceScanner, PbxprojWriter, …)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pbxgen_core::prelude::*;
//!
//! # fn run(scanner: Box<dyn SourceScanner>) -> CoreResult<()> {
//! let spec = ProjectSpec::new("App", "/path/to/project").with_target(
//!     Target::new("App", TargetType::Application, Platform::Ios).with_source("App"),
//! );
//!
//! let mut generator = ProjectGenerator::new(spec, scanner, GeneratorOptions::default());
//! let project = generator.generate()?;
//! assert_eq!(project.graph.object_version(), 46);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod graph;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratedProject, GenerationError, GeneratorOptions, ProjectGenerator,
        ports::{FilePhase, ProjectWriter, SourceFile, SourceScanner},
    };
    pub use crate::domain::{
        BuildScript, Config, ConfigType, Dependency, DependencyKind, Platform, ProjectSpec,
        SettingPresets, SettingValue, Settings, SpecOptions, Target, TargetSource, TargetType,
    };
    pub use crate::error::{CoreError, CoreResult, ErrorCategory};
    pub use crate::graph::{Object, ObjectGraph, ObjectKind, Reference};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
