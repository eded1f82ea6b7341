//! Project-root discovery and logical-to-physical path resolution.

use crate::constants::{PRIVATE_DIR, PROJECT_DESCRIPTOR_EXTENSION, PUBLIC_DIR};
use crate::error::{ClassGenError, Result};
use crate::models::{LogicalPathHierarchy, Placement};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Maps logical folder hierarchies onto a project's directory tree.
pub struct PathResolver;

impl PathResolver {
    /// Walks upward from `start` to the first directory holding a `.uproject` file.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::ProjectRootNotFound`] if the filesystem root is
    /// reached without finding a descriptor.
    pub fn resolve_project_root(start: &Path) -> Result<PathBuf> {
        let absolute = absolutize(start);

        for dir in absolute.ancestors() {
            match find_descriptor(dir) {
                Ok(Some(_)) => return Ok(dir.to_path_buf()),
                Ok(None) => {}
                Err(e) => debug!("Skipping unreadable directory {}: {e}", dir.display()),
            }
        }

        Err(ClassGenError::ProjectRootNotFound {
            start: start.to_path_buf(),
        })
    }

    /// Joins the normalized hierarchy onto `project_root`.
    ///
    /// `["Public", "X"]` and `["Source", "Public", "X"]` resolve to the same path.
    #[must_use]
    pub fn to_physical_path(project_root: &Path, hierarchy: &LogicalPathHierarchy) -> PathBuf {
        hierarchy
            .normalized()
            .segments()
            .iter()
            .fold(project_root.to_path_buf(), |path, segment| path.join(segment))
    }

    /// Public/Private/Unclassified for `hierarchy`.
    #[must_use]
    pub fn classify(hierarchy: &LogicalPathHierarchy) -> Placement {
        hierarchy.placement()
    }

    /// Directory that receives the implementation when the header is public.
    ///
    /// Replaces the first segment of `dir` below `project_root` that equals
    /// `Public` (ignoring case) with `Private`. Folders above the project root
    /// are never rewritten, and only whole segments match: `PublicAssets` is
    /// left alone. Returns `None` if `dir` is not inside `project_root` or has
    /// no `Public` segment below it.
    #[must_use]
    pub fn private_counterpart(project_root: &Path, dir: &Path) -> Option<PathBuf> {
        let relative = dir.strip_prefix(project_root).ok()?;
        let mut replaced = false;
        let mut result = project_root.to_path_buf();

        for component in relative.components() {
            match component {
                Component::Normal(segment)
                    if !replaced
                        && segment
                            .to_str()
                            .is_some_and(|s| s.eq_ignore_ascii_case(PUBLIC_DIR)) =>
                {
                    result.push(PRIVATE_DIR);
                    replaced = true;
                }
                Component::Normal(segment) => result.push(segment),
                _ => return None,
            }
        }

        replaced.then_some(result)
    }
}

/// Returns the first `.uproject` file in `dir`, in sorted listing order.
///
/// # Errors
///
/// Returns an I/O error if `dir` cannot be listed.
pub fn find_descriptor(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut descriptors: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_DESCRIPTOR_EXTENSION))
        })
        .collect();

    descriptors.sort();
    Ok(descriptors.into_iter().next())
}

fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with_descriptor() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ShooterGame");
        fs::create_dir_all(root.join("Source").join("ShooterGame").join("Public")).unwrap();
        fs::write(root.join("ShooterGame.uproject"), "{}").unwrap();
        (temp, root.canonicalize().unwrap())
    }

    #[test]
    fn test_resolve_from_nested_directory() {
        let (_temp, root) = project_with_descriptor();
        let nested = root.join("Source").join("ShooterGame").join("Public");

        assert_eq!(PathResolver::resolve_project_root(&nested).unwrap(), root);
        assert_eq!(PathResolver::resolve_project_root(&root).unwrap(), root);
    }

    #[test]
    fn test_resolve_without_descriptor() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("NotAProject");
        fs::create_dir_all(&dir).unwrap();

        // Only fails if no ancestor of the temp dir happens to be a project.
        if let Err(err) = PathResolver::resolve_project_root(&dir) {
            assert!(matches!(err, ClassGenError::ProjectRootNotFound { .. }));
        }
    }

    #[test]
    fn test_find_descriptor_picks_first_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Zeta.uproject"), "{}").unwrap();
        fs::write(temp.path().join("Alpha.uproject"), "{}").unwrap();
        fs::write(temp.path().join("Alpha.uplugin"), "{}").unwrap();
        fs::create_dir(temp.path().join("Dir.uproject")).unwrap();

        let found = find_descriptor(temp.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "Alpha.uproject");
    }

    #[test]
    fn test_to_physical_path_inserts_source() {
        let root = Path::new("/Proj");
        let short = LogicalPathHierarchy::parse("Public/X");
        let full = LogicalPathHierarchy::parse("Source/Public/X");

        let expected = Path::new("/Proj").join("Source").join("Public").join("X");
        assert_eq!(PathResolver::to_physical_path(root, &short), expected);
        assert_eq!(PathResolver::to_physical_path(root, &full), expected);
    }

    #[test]
    fn test_to_physical_path_empty_is_source_root() {
        let root = Path::new("/Proj");
        assert_eq!(
            PathResolver::to_physical_path(root, &LogicalPathHierarchy::default()),
            Path::new("/Proj").join("Source")
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            PathResolver::classify(&LogicalPathHierarchy::parse("Source/Public/X")),
            Placement::Public
        );
        assert_eq!(
            PathResolver::classify(&LogicalPathHierarchy::parse("Source/Private/X")),
            Placement::Private
        );
        assert_eq!(
            PathResolver::classify(&LogicalPathHierarchy::parse("Source/X")),
            Placement::Unclassified
        );
    }

    #[test]
    fn test_private_counterpart_replaces_whole_segment_once() {
        let root = Path::new("/Proj");
        assert_eq!(
            PathResolver::private_counterpart(root, Path::new("/Proj/Source/Public/Chars")).unwrap(),
            Path::new("/Proj/Source/Private/Chars")
        );

        assert_eq!(
            PathResolver::private_counterpart(
                Path::new("/Work/PublicAssets"),
                Path::new("/Work/PublicAssets/Source/public/Public")
            )
            .unwrap(),
            Path::new("/Work/PublicAssets/Source/Private/Public")
        );

        assert_eq!(
            PathResolver::private_counterpart(root, Path::new("/Proj/Source/Chars")),
            None
        );
    }

    #[test]
    fn test_private_counterpart_ignores_folders_above_project() {
        let root = Path::new("/Users/Public/Documents/Shooter");
        let dir = root.join("Source").join("Public").join("Chars");

        let private = PathResolver::private_counterpart(root, &dir).unwrap();
        assert_eq!(
            private,
            Path::new("/Users/Public/Documents/Shooter/Source/Private/Chars")
        );
        assert!(private.starts_with(root));

        assert_eq!(
            PathResolver::private_counterpart(root, &root.join("Source").join("Chars")),
            None
        );
        assert_eq!(
            PathResolver::private_counterpart(root, Path::new("/Elsewhere/Public")),
            None
        );
    }
}
