//! Project writers.

pub mod pbxproj;

pub use pbxproj::PbxprojWriter;
