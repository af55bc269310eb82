pub mod dependency;
pub mod project;
pub mod target;

pub use dependency::{Dependency, DependencyKind};
pub use project::{Config, ProjectSpec, SpecOptions};
pub use target::{BuildScript, ScriptSource, Target, TargetSource};
