//! Header scanning for `UCLASS` declarations.
//!
//! This is a lightweight pattern match, not a C++ parser. Each header contributes
//! at most one declaration: the first `UCLASS(...) class [X_API] Name : public Base`
//! in the file. Headers without a match are the common case and are skipped silently.

use crate::error::{ClassGenError, Result};
use crate::models::ClassRecord;
use regex::Regex;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Marker, optional argument list, `class`, optional export macro, name, `: public`, base.
///
/// `(?s)` lets the argument list and whitespace span lines.
const UCLASS_PATTERN: &str = r"(?s)UCLASS\s*(?:\(.*?\))?\s*class\s+(?:\w+_API\s+)?(?P<class_name>\w+)\s*:\s*public\s+(?P<base_class>\w+)";

/// Default header extensions.
pub const DEFAULT_HEADER_EXTENSIONS: &[&str] = &["h"];

/// Walks source trees and extracts annotated class declarations.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    pattern: Regex,
    extensions: Vec<String>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SourceScanner {
    /// Creates a scanner for `.h` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(UCLASS_PATTERN).expect("UCLASS pattern is a valid regex"),
            extensions: DEFAULT_HEADER_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            cancel: None,
        }
    }

    /// Replaces the header extensions to look at (without the leading dot).
    ///
    /// Extension matching ignores case. An empty list keeps the defaults.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Attaches a flag that aborts the walk with [`ClassGenError::Cancelled`] once set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Header extensions this scanner reads.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Scans every header under `root`.
    ///
    /// Entries are visited in file-name order, so the result is stable across runs.
    ///
    /// # Errors
    ///
    /// - [`ClassGenError::SourceTreeUnreadable`] if any directory or header cannot be read
    /// - [`ClassGenError::Cancelled`] if the cancellation flag was raised
    pub fn scan(&self, root: &Path) -> Result<Vec<ClassRecord>> {
        let mut records = Vec::new();
        let mut headers_read = 0usize;

        for entry in WalkDir::new(root).sort_by_file_name() {
            if self.is_cancelled() {
                return Err(ClassGenError::Cancelled);
            }

            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(root).to_path_buf();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                ClassGenError::SourceTreeUnreadable { path, source }
            })?;

            if !entry.file_type().is_file() || !self.is_header(entry.path()) {
                continue;
            }

            let bytes = std::fs::read(entry.path()).map_err(|source| {
                ClassGenError::SourceTreeUnreadable {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;
            headers_read += 1;

            let text = String::from_utf8_lossy(&bytes);
            if let Some(record) = self.parse_header(&text, entry.path()) {
                debug!(
                    "Found {} : {} in {}",
                    record.class_name,
                    record.base_class_name,
                    record.source_file_path.display()
                );
                records.push(record);
            } else {
                trace!("No UCLASS in {}", entry.path().display());
            }
        }

        debug!(
            "Scanned {} headers under {}, {} classes",
            headers_read,
            root.display(),
            records.len()
        );
        Ok(records)
    }

    /// Extracts the first declaration from header text, if any.
    #[must_use]
    pub fn parse_header(&self, text: &str, path: &Path) -> Option<ClassRecord> {
        let caps = self.pattern.captures(text)?;
        Some(ClassRecord::new(
            &caps["class_name"],
            &caps["base_class"],
            path,
        ))
    }

    fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for SourceScanner {
    fn default() -> Self {
        Self::new()
    }
}
