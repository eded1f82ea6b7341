//! Error kinds for the class-generation core.
//!
//! User-facing kinds (missing project, unknown base class, ...) abort the current
//! operation with a message meant for the developer. I/O kinds carry the path that
//! failed so the message is actionable on its own.

use std::io;
use std::path::PathBuf;

/// Result type used throughout the core.
pub type Result<T, E = ClassGenError> = std::result::Result<T, E>;

/// Every way an "add class" operation can stop.
#[derive(Debug, thiserror::Error)]
pub enum ClassGenError {
    /// No ancestor of the start directory holds a `.uproject` file.
    #[error(
        "Unable to locate a .uproject file in {} or any parent directory. Please ensure this is a valid Unreal project.",
        start.display()
    )]
    ProjectRootNotFound {
        /// Directory the upward search started from
        start: PathBuf,
    },

    /// A file or directory under a scanned source root could not be read.
    #[error("Failed to read source tree at {}: {source}", path.display())]
    SourceTreeUnreadable {
        /// File or directory that failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The user gave no destination folder.
    #[error("No valid folder selected.")]
    NoSelectionMade,

    /// The destination folder would resolve outside the project.
    #[error("Folder '{folder}' is not inside the project: segment '{segment}' is not allowed")]
    InvalidFolder {
        /// Folder as entered
        folder: String,
        /// Offending segment
        segment: String,
    },

    /// The selected base class is not part of the index used for generation.
    #[error("Base class '{0}' is not in the class index. Re-run the scan or pick another base class.")]
    UnknownBaseClass(String),

    /// The engine installation could not be found. Only regeneration depends on it.
    #[error("Unable to determine Unreal Engine location: {0}")]
    EngineRootUndeterminable(String),

    /// A scan was aborted through its cancellation flag.
    #[error("Source scan cancelled")]
    Cancelled,

    /// The requested class name is not a usable C++ identifier.
    #[error("Invalid class name '{name}': {reason}")]
    InvalidClassName {
        /// Name as entered
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The project descriptor exists but could not be read or parsed.
    #[error("Failed to read project descriptor {}: {reason}", path.display())]
    DescriptorUnreadable {
        /// Descriptor path
        path: PathBuf,
        /// Read or parse failure
        reason: String,
    },

    /// A target file already exists and overwriting was not requested.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    /// Persisting a generated file failed.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl ClassGenError {
    /// Returns true for errors caused by user input or project layout rather than I/O.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::ProjectRootNotFound { .. }
                | Self::NoSelectionMade
                | Self::InvalidFolder { .. }
                | Self::UnknownBaseClass(_)
                | Self::EngineRootUndeterminable(_)
                | Self::InvalidClassName { .. }
                | Self::DescriptorUnreadable { .. }
                | Self::FileExists(_)
        )
    }
}
