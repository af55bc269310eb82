// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pbxgen: the normalized project spec.
//!
//! This module contains pure data and the small rules attached to it
//! (embedding defaults, product file names, setting values). It performs no
//! I/O and emits no logs; spec loading lives in `pbxgen-adapters` and graph
//! generation in `crate::application`.
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod settings;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    dependency::{Dependency, DependencyKind},
    project::{
        Config, DEFAULT_CARTHAGE_BUILD_PATH, DEFAULT_CARTHAGE_EXECUTABLE, ProjectSpec, SpecOptions,
    },
    target::{BuildScript, ScriptSource, Target, TargetSource},
};

pub use error::DomainError;

pub use settings::{BuildSettings, SettingValue, Settings};

pub use value_objects::{ConfigType, Platform, SettingPresets, TargetType};
