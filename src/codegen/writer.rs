//! Persisting generated files.
//!
//! The generator only computes content; a [`FileSink`] decides how it reaches
//! storage. [`DiskSink`] writes atomically, [`MemorySink`] keeps everything in
//! memory for tests and previews.

use crate::error::{ClassGenError, Result};
use crate::models::GeneratedFilePair;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Destination for generated files.
pub trait FileSink {
    /// Returns true if `path` already exists.
    fn exists(&self, path: &Path) -> bool;

    /// Creates `dir` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::WriteFailed`] on failure.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// Writes `contents` to `path`, replacing it if present.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::WriteFailed`] on failure.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Deletes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::WriteFailed`] on failure.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// Writes to the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSink;

impl FileSink for DiskSink {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| ClassGenError::WriteFailed {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Atomic write: `<name>.tmp` next to the target, then rename.
    ///
    /// The temp file must not exist yet, so an unrelated file is never replaced.
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = temp_path_for(path);

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .and_then(|mut file| file.write_all(contents.as_bytes()))
            .map_err(|source| {
                if source.kind() != std::io::ErrorKind::AlreadyExists {
                    let _ = fs::remove_file(&temp_path);
                }
                ClassGenError::WriteFailed {
                    path: temp_path.clone(),
                    source,
                }
            })?;

        fs::rename(&temp_path, path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            ClassGenError::WriteFailed {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|source| ClassGenError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `MyPawn.h` → `MyPawn.h.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a file, as if it already existed.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Contents of a written file.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths of all files, sorted.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Returns true if `dir` was created through this sink.
    #[must_use]
    pub fn has_dir(&self, dir: &Path) -> bool {
        self.dirs.borrow().contains(dir)
    }
}

impl FileSink for MemorySink {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.files.borrow_mut().remove(path);
        Ok(())
    }
}

/// Writes both files of `pair` through `sink`.
///
/// Existing targets are checked before anything is written, so a refused
/// overwrite leaves the tree untouched. Parent directories are created first.
/// If the second write fails, a header created by this call is removed again;
/// a header that replaced an existing file (`overwrite`) keeps its new content.
///
/// # Errors
///
/// - [`ClassGenError::FileExists`] if a target exists and `overwrite` is false
/// - [`ClassGenError::WriteFailed`] if creating a directory or writing fails
pub fn persist(pair: &GeneratedFilePair, sink: &dyn FileSink, overwrite: bool) -> Result<()> {
    if !overwrite {
        if let Some(existing) = pair.paths().into_iter().find(|path| sink.exists(path)) {
            return Err(ClassGenError::FileExists(existing.clone()));
        }
    }

    let mut created: Vec<&Path> = Vec::new();

    for (path, contents) in [
        (&pair.header_path, &pair.header_content),
        (&pair.impl_path, &pair.impl_content),
    ] {
        let existed = sink.exists(path);
        let written = path
            .parent()
            .map_or(Ok(()), |parent| sink.create_dir_all(parent))
            .and_then(|()| sink.write(path, contents));

        if let Err(err) = written {
            for path in created {
                if let Err(cleanup) = sink.remove_file(path) {
                    warn!("Could not remove partially written {}: {cleanup}", path.display());
                }
            }
            return Err(err);
        }

        if !existed {
            created.push(path.as_path());
        }
        info!("Wrote {}", path.display());
    }

    Ok(())
}
