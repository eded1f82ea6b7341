//! Service layer for the class wizard.
//!
//! Services combine parsing, indexing, and generation into the operations the
//! command line exposes. They take their collaborators (file sink, project-file
//! regenerator, picker) as parameters.

pub mod add_class;
pub mod class_index;
pub mod engine;
pub mod paths;
pub mod project;

// Re-export commonly used types
pub use add_class::{AddClassOutcome, AddClassRequest, AddClassResult, AddClassService};
pub use class_index::ClassIndex;
pub use engine::{EngineLocator, EngineRoot, EngineSource};
pub use paths::PathResolver;
pub use project::{EngineOverrides, ProjectContext};
