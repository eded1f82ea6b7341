//! Engine installation discovery.
//!
//! The engine tree is scanned for base classes and hosts the project-file
//! generator. Its location is taken from the first source that yields one:
//!
//! 1. an explicit command-line root
//! 2. `[paths] engine_root` in the config file
//! 3. the `[engines]` entry for the project's `EngineAssociation`
//! 4. the nearest ancestor of the project root that contains an `Engine/` folder

use crate::config::Config;
use crate::error::{ClassGenError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the folder that marks an engine installation root.
pub const ENGINE_DIR: &str = "Engine";

/// Where an engine root came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum EngineSource {
    /// `--engine-root`
    CommandLine,
    /// `[paths] engine_root`
    ConfigPath,
    /// `[engines]` entry for this association
    Association(String),
    /// Ancestor of the project root
    ParentDirectory,
}

/// A located engine installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineRoot {
    /// Installation root (contains `Engine/`)
    pub path: PathBuf,
    /// How it was found
    pub source: EngineSource,
}

impl EngineRoot {
    /// Engine source tree scanned for base classes: `<root>/Engine/Source`.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.path.join(ENGINE_DIR).join("Source")
    }
}

/// Resolves the engine installation for a project.
#[derive(Debug)]
pub struct EngineLocator<'a> {
    config: &'a Config,
    explicit_root: Option<PathBuf>,
}

impl<'a> EngineLocator<'a> {
    /// Creates a locator backed by `config`.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            explicit_root: None,
        }
    }

    /// Uses `root` ahead of every other source.
    #[must_use]
    pub fn with_explicit_root(mut self, root: Option<PathBuf>) -> Self {
        self.explicit_root = root;
        self
    }

    /// Finds the engine root for the project at `project_root`.
    ///
    /// # Arguments
    ///
    /// * `project_root` - Directory holding the `.uproject` file
    /// * `association` - The descriptor's `EngineAssociation`, if any
    ///
    /// # Returns
    ///
    /// * `Ok(EngineRoot)` - The first configured or discovered root
    /// * `Err(ClassGenError::EngineRootUndeterminable)` - Nothing matched
    pub fn locate(&self, project_root: &Path, association: Option<&str>) -> Result<EngineRoot> {
        if let Some(path) = &self.explicit_root {
            return Ok(EngineRoot {
                path: path.clone(),
                source: EngineSource::CommandLine,
            });
        }

        if let Some(path) = &self.config.paths.engine_root {
            return Ok(EngineRoot {
                path: path.clone(),
                source: EngineSource::ConfigPath,
            });
        }

        if let Some(association) = association {
            if let Some(path) = self.config.engines.get(association) {
                return Ok(EngineRoot {
                    path: path.clone(),
                    source: EngineSource::Association(association.to_string()),
                });
            }
            debug!("No engine registered for association '{association}'");
        }

        if let Some(path) = find_engine_ancestor(project_root) {
            return Ok(EngineRoot {
                path,
                source: EngineSource::ParentDirectory,
            });
        }

        let reason = match association {
            Some(association) => format!(
                "no engine registered for association '{association}' and no Engine folder above {}. Set one with `ueclass config engine {association} <DIR>` or pass --engine-root",
                project_root.display()
            ),
            None => format!(
                "no Engine folder above {}. Pass --engine-root or set paths.engine_root",
                project_root.display()
            ),
        };
        Err(ClassGenError::EngineRootUndeterminable(reason))
    }
}

/// Nearest directory at or above `start` that contains an `Engine` folder.
fn find_engine_ancestor(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(ENGINE_DIR).is_dir())
        .map(Path::to_path_buf)
}
