//! Infrastructure adapters for pbxgen.
//!
//! This crate implements the ports defined in `pbxgen-core::application::ports`
//! and the manifest loader that feeds the generator. It contains all file
//! system I/O.

pub mod scanner;
pub mod spec_loader;
pub mod writer;

// Re-export commonly used adapters
pub use scanner::LocalSourceScanner;
pub use spec_loader::{ManifestFormat, SpecLoader};
pub use writer::PbxprojWriter;
