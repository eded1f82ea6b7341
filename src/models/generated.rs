//! Rendered header/implementation pair awaiting persistence.

use serde::Serialize;
use std::path::PathBuf;

/// Output of the file generator: two paths and their contents.
///
/// Computing this has no side effects; a `FileSink` writes it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFilePair {
    /// Where the header goes
    pub header_path: PathBuf,
    /// Rendered header text
    pub header_content: String,
    /// Where the implementation goes
    pub impl_path: PathBuf,
    /// Rendered implementation text
    pub impl_content: String,
}

impl GeneratedFilePair {
    /// Both target paths, header first.
    #[must_use]
    pub fn paths(&self) -> [&PathBuf; 2] {
        [&self.header_path, &self.impl_path]
    }
}
