//! `ueclass project`: show what was discovered about a project.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::services::{EngineOverrides, EngineRoot, ProjectContext};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show project root, descriptor, and engine location
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Directory inside the project (defaults to the current directory)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Engine installation root (directory containing Engine/)
    #[arg(long, value_name = "DIR")]
    pub engine_root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct ProjectResponse<'a> {
    root: &'a PathBuf,
    descriptor: &'a PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine_association: Option<&'a str>,
    modules: Vec<&'a str>,
    module_api: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine: Option<&'a EngineRoot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine_source: Option<&'a PathBuf>,
    warnings: &'a [String],
}

impl ProjectArgs {
    /// Execute the project command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let overrides = EngineOverrides {
            engine_root: self.engine_root.clone(),
            engine_source: None,
        };
        let project = ProjectContext::discover(&self.project_dir, &config, &overrides)?;

        let response = ProjectResponse {
            root: &project.root,
            descriptor: &project.descriptor_path,
            project_name: project
                .descriptor
                .as_ref()
                .and_then(|d| d.project_name()),
            engine_association: project.engine_association(),
            modules: project
                .descriptor
                .as_ref()
                .map(|d| d.modules.iter().map(|m| m.name.as_str()).collect())
                .unwrap_or_default(),
            module_api: project.module_api(None, &config),
            engine: project.engine.as_ref(),
            engine_source: project.engine_source.as_ref(),
            warnings: &project.warnings,
        };

        if self.json {
            return print_json(&response);
        }

        println!("Project root:  {}", response.root.display());
        println!("Descriptor:    {}", response.descriptor.display());
        println!(
            "Association:   {}",
            response.engine_association.unwrap_or("(none)")
        );
        println!(
            "Modules:       {}",
            if response.modules.is_empty() {
                "(none)".to_string()
            } else {
                response.modules.join(", ")
            }
        );
        println!("Module API:    {}", response.module_api);
        match response.engine {
            Some(engine) => println!(
                "Engine root:   {} ({:?})",
                engine.path.display(),
                engine.source
            ),
            None => println!("Engine root:   (not found)"),
        }
        if let Some(source) = response.engine_source {
            println!("Engine source: {}", source.display());
        }

        Ok(())
    }
}
