//! Source generation for new classes.
//!
//! Rendering is pure ([`FileGenerator`]); writing goes through a [`FileSink`]
//! and project-file regeneration through a [`ProjectFileRegenerator`].

pub mod class_files;
pub mod regenerate;
pub mod templates;
pub mod writer;

pub use class_files::{FileGenerator, GenerateOptions};
pub use regenerate::{ProjectFileRegenerator, RegenOutcome, ScriptRegenerator};
pub use writer::{persist, DiskSink, FileSink, MemorySink};
