//! The "add class" operation end to end.
//!
//! Steps, each of which can stop the operation:
//!
//! 1. resolve the project root (`ProjectRootNotFound`)
//! 2. check the destination folder (`NoSelectionMade`, `InvalidFolder`)
//! 3. index engine and project classes (`SourceTreeUnreadable`, `Cancelled`)
//! 4. let the picker choose base class and name (`InvalidClassName`, or a cancel)
//! 5. render the file pair (`UnknownBaseClass`)
//! 6. write both files (`FileExists`, `WriteFailed`)
//! 7. regenerate project files; failures here only produce warnings

use crate::app::picker::{ClassPicker, Selection};
use crate::codegen::{
    persist, FileGenerator, FileSink, GenerateOptions, ProjectFileRegenerator, RegenOutcome,
};
use crate::config::Config;
use crate::error::{ClassGenError, Result};
use crate::models::{GeneratedFilePair, LogicalPathHierarchy, Placement};
use crate::parser::SourceScanner;
use crate::services::class_index::ClassIndex;
use crate::services::paths::PathResolver;
use crate::services::project::{EngineOverrides, ProjectContext};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

/// Inputs of one "add class" operation.
#[derive(Debug, Clone, Default)]
pub struct AddClassRequest {
    /// Directory to start the project search from
    pub project_dir: PathBuf,
    /// Destination as a logical hierarchy (`Source/Public/Chars`).
    ///
    /// `None` means the `Source` root. An explicit value with no segments is
    /// treated as no selection.
    pub folder: Option<String>,
    /// Engine discovery overrides
    pub engine: EngineOverrides,
    /// Export macro override
    pub module_api: Option<String>,
    /// Emit `UCLASS()`/`GENERATED_BODY()`; `None` uses the config value
    pub reflected: Option<bool>,
    /// Compute everything but write nothing
    pub dry_run: bool,
    /// Replace existing files
    pub overwrite: bool,
    /// Run the project-file generator; `None` uses the config value
    pub regenerate: Option<bool>,
    /// Scan engine and project roots on separate threads
    pub parallel_scan: bool,
}

/// What a successful operation produced.
#[derive(Debug, Clone, Serialize)]
pub struct AddClassOutcome {
    /// Project root
    pub project_root: PathBuf,
    /// Base class, in its indexed spelling
    pub base_class: String,
    /// New class name
    pub class_name: String,
    /// Placement of the destination folder
    pub placement: Placement,
    /// Generated paths and contents
    pub files: GeneratedFilePair,
    /// False for dry runs
    pub written: bool,
    /// Set when the project-file generator ran
    pub regenerated: Option<bool>,
    /// Non-fatal problems
    pub warnings: Vec<String>,
}

/// Result of [`AddClassService::run`].
#[derive(Debug, Clone)]
pub enum AddClassResult {
    /// Files generated (and written unless dry-run)
    Created(AddClassOutcome),
    /// The picker was cancelled; nothing was written
    Cancelled,
}

/// Runs the operation against injected collaborators.
pub struct AddClassService<'a> {
    config: &'a Config,
    sink: &'a dyn FileSink,
    regenerator: &'a dyn ProjectFileRegenerator,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> AddClassService<'a> {
    /// Creates a service writing through `sink` and regenerating with `regenerator`.
    pub fn new(
        config: &'a Config,
        sink: &'a dyn FileSink,
        regenerator: &'a dyn ProjectFileRegenerator,
    ) -> Self {
        Self {
            config,
            sink,
            regenerator,
            cancel: None,
        }
    }

    /// Lets another thread abort the scan.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs the operation.
    ///
    /// # Errors
    ///
    /// Any [`ClassGenError`] from the steps listed in the module docs. Nothing is
    /// written when an error is returned before the write step.
    pub fn run(
        &self,
        request: &AddClassRequest,
        picker: &mut dyn ClassPicker,
    ) -> Result<AddClassResult> {
        let project_root = PathResolver::resolve_project_root(&request.project_dir)?;

        let hierarchy = match &request.folder {
            Some(folder) => {
                let hierarchy = LogicalPathHierarchy::parse(folder);
                if hierarchy.is_empty() {
                    return Err(ClassGenError::NoSelectionMade);
                }
                if let Some(segment) = hierarchy.escaping_segment() {
                    return Err(ClassGenError::InvalidFolder {
                        folder: folder.clone(),
                        segment: segment.to_string(),
                    });
                }
                hierarchy
            }
            None => LogicalPathHierarchy::source_root(),
        };

        let project = ProjectContext::discover(&project_root, self.config, &request.engine)?;
        let mut warnings = project.warnings.clone();

        let index = self.build_index(&project, request.parallel_scan)?;
        info!("Class index holds {} classes", index.len());

        let (base_class, class_name) = match picker.pick(&index)? {
            Selection::Confirmed {
                base_class,
                new_class_name,
            } => (base_class, new_class_name),
            Selection::Cancelled => {
                info!("Class creation cancelled");
                return Ok(AddClassResult::Cancelled);
            }
        };

        let placement = PathResolver::classify(&hierarchy);
        let destination = PathResolver::to_physical_path(&project.root, &hierarchy);

        let generator = FileGenerator::new(GenerateOptions {
            module_api: project.module_api(request.module_api.as_deref(), self.config),
            reflected: request.reflected.unwrap_or(self.config.generation.reflected),
        });
        let files = generator.generate(
            &project.root,
            &destination,
            &base_class,
            &class_name,
            &index,
            placement,
        )?;
        let base_class = index.lookup(&base_class)?.class_name.clone();

        if request.dry_run {
            return Ok(AddClassResult::Created(AddClassOutcome {
                project_root: project.root,
                base_class,
                class_name,
                placement,
                files,
                written: false,
                regenerated: None,
                warnings,
            }));
        }

        persist(&files, self.sink, request.overwrite)?;

        let regenerated = if request
            .regenerate
            .unwrap_or(self.config.generation.regenerate_project_files)
        {
            self.regenerate(&project, &mut warnings)
        } else {
            None
        };

        Ok(AddClassResult::Created(AddClassOutcome {
            project_root: project.root,
            base_class,
            class_name,
            placement,
            files,
            written: true,
            regenerated,
            warnings,
        }))
    }

    fn build_index(&self, project: &ProjectContext, parallel: bool) -> Result<ClassIndex> {
        let mut scanner =
            SourceScanner::new().with_extensions(self.config.generation.header_extensions.iter());
        if let Some(flag) = &self.cancel {
            scanner = scanner.with_cancel_flag(Arc::clone(flag));
        }

        let roots = project.index_roots();
        if parallel {
            ClassIndex::build_parallel(&scanner, &roots)
        } else {
            ClassIndex::build(&scanner, &roots)
        }
    }

    fn regenerate(&self, project: &ProjectContext, warnings: &mut Vec<String>) -> Option<bool> {
        let Some(engine) = &project.engine else {
            let message = "Engine location unknown; project files were not regenerated".to_string();
            warn!("{message}");
            warnings.push(message);
            return None;
        };

        match self
            .regenerator
            .regenerate(&engine.path, &project.descriptor_path)
        {
            Ok(RegenOutcome::Completed) => Some(true),
            Ok(RegenOutcome::ScriptMissing(script)) => {
                warnings.push(format!(
                    "{} not found. Please configure the engine path.",
                    script.display()
                ));
                None
            }
            Ok(RegenOutcome::Failed { status, stderr }) => {
                let status = status.map_or_else(|| "signal".to_string(), |code| code.to_string());
                warnings.push(format!(
                    "Project file generation failed (exit {status}): {stderr}"
                ));
                Some(false)
            }
            Err(e) => {
                warn!("{e:#}");
                warnings.push(format!("{e:#}"));
                Some(false)
            }
        }
    }
}
