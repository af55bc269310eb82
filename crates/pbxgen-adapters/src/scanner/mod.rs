//! Source scanning adapters.

pub mod file_types;
pub mod local;

pub use local::LocalSourceScanner;
