//! Data models for indexed classes, folder hierarchies, and generated files.
//!
//! This module contains the core data structures used throughout the application.
//! Models are independent of the filesystem and of the command line.

pub mod class_record;
pub mod generated;
pub mod hierarchy;

// Re-export all model types
pub use class_record::ClassRecord;
pub use generated::GeneratedFilePair;
pub use hierarchy::{LogicalPathHierarchy, Placement};
