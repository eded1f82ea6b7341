//! Everything known about the project an operation runs against.

use crate::config::Config;
use crate::constants::{DEFAULT_MODULE_API, SOURCE_DIR};
use crate::error::{ClassGenError, Result};
use crate::parser::{read_descriptor, ProjectDescriptor};
use crate::services::engine::{EngineLocator, EngineRoot};
use crate::services::paths::{find_descriptor, PathResolver};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command-line overrides for engine discovery.
#[derive(Debug, Clone, Default)]
pub struct EngineOverrides {
    /// `--engine-root`
    pub engine_root: Option<PathBuf>,
    /// `--engine-source`
    pub engine_source: Option<PathBuf>,
}

/// A resolved project: root, descriptor, and engine location.
///
/// Problems that do not stop class generation (an unreadable descriptor, an
/// unknown engine) are collected in `warnings` instead of failing discovery.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ueclass::config::Config;
/// use ueclass::services::{EngineOverrides, ProjectContext};
///
/// let config = Config::load()?;
/// let project = ProjectContext::discover(Path::new("."), &config, &EngineOverrides::default())?;
/// println!("{}", project.root.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory holding the `.uproject` file
    pub root: PathBuf,
    /// The `.uproject` file
    pub descriptor_path: PathBuf,
    /// Parsed descriptor, if it could be read
    pub descriptor: Option<ProjectDescriptor>,
    /// Engine installation, if found
    pub engine: Option<EngineRoot>,
    /// Engine source tree to index, if known
    pub engine_source: Option<PathBuf>,
    /// Non-fatal problems found during discovery
    pub warnings: Vec<String>,
}

impl ProjectContext {
    /// Resolves the project containing `start` and its engine.
    ///
    /// # Errors
    ///
    /// Returns [`ClassGenError::ProjectRootNotFound`] if no ancestor of `start`
    /// holds a `.uproject` file.
    pub fn discover(start: &Path, config: &Config, overrides: &EngineOverrides) -> Result<Self> {
        let root = PathResolver::resolve_project_root(start)?;
        let descriptor_path = find_descriptor(&root)
            .ok()
            .flatten()
            .ok_or_else(|| ClassGenError::ProjectRootNotFound {
                start: start.to_path_buf(),
            })?;

        let mut warnings = Vec::new();

        let descriptor = match read_descriptor(&descriptor_path) {
            Ok(descriptor) => Some(descriptor),
            Err(err) => {
                warn!("{err}");
                warnings.push(err.to_string());
                None
            }
        };

        let association = descriptor
            .as_ref()
            .and_then(|d| d.engine_association.as_deref());

        let engine = match EngineLocator::new(config)
            .with_explicit_root(overrides.engine_root.clone())
            .locate(&root, association)
        {
            Ok(engine) => Some(engine),
            Err(err) => {
                warn!("{err}");
                warnings.push(err.to_string());
                None
            }
        };

        let engine_source = overrides
            .engine_source
            .clone()
            .or_else(|| engine.as_ref().map(EngineRoot::source_dir));

        match &engine_source {
            Some(dir) if !dir.is_dir() => {
                let message = format!(
                    "Engine source directory {} does not exist; only project classes will be indexed",
                    dir.display()
                );
                warn!("{message}");
                warnings.push(message);
            }
            None => {
                let message =
                    "No engine source directory known; only project classes will be indexed"
                        .to_string();
                warn!("{message}");
                warnings.push(message);
            }
            Some(_) => {}
        }

        Ok(Self {
            root,
            descriptor_path,
            descriptor,
            engine,
            engine_source,
            warnings,
        })
    }

    /// `<root>/Source`.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// Roots to index, engine first.
    #[must_use]
    pub fn index_roots(&self) -> Vec<PathBuf> {
        self.engine_source
            .iter()
            .cloned()
            .chain(std::iter::once(self.source_dir()))
            .collect()
    }

    /// The descriptor's `EngineAssociation`, if any.
    #[must_use]
    pub fn engine_association(&self) -> Option<&str> {
        self.descriptor
            .as_ref()
            .and_then(|d| d.engine_association.as_deref())
    }

    /// Export macro for generated classes.
    ///
    /// Precedence: `explicit`, then the config file, then the descriptor's first
    /// module, then `MYPROJECT_API`.
    #[must_use]
    pub fn module_api(&self, explicit: Option<&str>, config: &Config) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| config.generation.module_api.clone())
            .or_else(|| {
                self.descriptor
                    .as_ref()
                    .and_then(ProjectDescriptor::primary_module_api)
            })
            .unwrap_or_else(|| DEFAULT_MODULE_API.to_string())
    }
}
