//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pbxgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the generator, implemented by infrastructure
//!   - `SourceScanner`: file system walking and file element creation
//!   - `ProjectWriter`: serialization of the finished graph
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `ProjectGenerator`)

pub mod output;

pub use output::{FilePhase, ProjectWriter, SourceFile, SourceScanner};
