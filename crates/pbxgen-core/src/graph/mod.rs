//! The project object graph: stable references, object kinds and the store
//! that owns them for one generation run.

pub mod object;
pub mod reference;
pub mod store;

pub use object::{
    BuildConfiguration, BuildFile, ConfigurationList, ContainerItemProxy, CopyFilesBuildPhase,
    DEFAULT_BUILD_ACTION_MASK, FileReference, FilesBuildPhase, Group, NativeTarget, Object,
    ObjectKind, PROXY_TYPE_NATIVE_TARGET, ProjectObject, ShellScriptBuildPhase, SourceTree,
    SubfolderSpec, TargetDependency,
};
pub use reference::Reference;
pub use store::{ARCHIVE_VERSION, GraphError, OBJECT_VERSION, ObjectGraph};
