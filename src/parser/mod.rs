//! Parsing for the file formats the wizard reads.
//!
//! This module handles scanning C++ headers for `UCLASS` declarations and
//! reading `.uproject` descriptors.

pub mod descriptor;
pub mod source_scanner;

// Re-export commonly used types and functions
pub use descriptor::{read_descriptor, ProjectDescriptor};
pub use source_scanner::SourceScanner;
