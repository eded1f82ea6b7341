//! Indexed class declarations.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One annotated class declaration found in a header.
///
/// Identity is the class name compared case-insensitively; the index keeps
/// at most one record per name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    /// Declared class name (e.g., "ACharacter")
    pub class_name: String,
    /// Publicly inherited base class (e.g., "APawn")
    pub base_class_name: String,
    /// Header the declaration was found in
    pub source_file_path: PathBuf,
}

impl ClassRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        base_class_name: impl Into<String>,
        source_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            base_class_name: base_class_name.into(),
            source_file_path: source_file_path.into(),
        }
    }

    /// Lookup key: the class name folded to lowercase.
    #[must_use]
    pub fn key(&self) -> String {
        fold_key(&self.class_name)
    }

    /// File name of the declaring header, used for `#include` lines.
    ///
    /// Falls back to the full stored path when it has no file name component.
    #[must_use]
    pub fn header_file_name(&self) -> String {
        self.source_file_path
            .file_name()
            .map_or_else(
                || self.source_file_path.to_string_lossy().into_owned(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    /// Returns true if this record was found under `root`.
    #[must_use]
    pub fn is_under(&self, root: &Path) -> bool {
        self.source_file_path.starts_with(root)
    }
}

/// Folds a class name into its case-insensitive lookup key.
#[must_use]
pub fn fold_key(name: &str) -> String {
    name.to_lowercase()
}
