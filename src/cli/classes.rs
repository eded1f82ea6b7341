//! `ueclass classes`: list the classes available as base classes.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::ClassRecord;
use crate::parser::SourceScanner;
use crate::services::{ClassIndex, EngineOverrides, ProjectContext};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// List indexed engine and project classes
#[derive(Debug, Clone, Args)]
pub struct ClassesArgs {
    /// Directory inside the project (defaults to the current directory)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Engine installation root (directory containing Engine/)
    #[arg(long, value_name = "DIR")]
    pub engine_root: Option<PathBuf>,

    /// Engine source tree to index instead of <engine-root>/Engine/Source
    #[arg(long, value_name = "DIR")]
    pub engine_source: Option<PathBuf>,

    /// Only show classes whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub filter: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct ClassesResponse<'a> {
    total: usize,
    shown: usize,
    classes: Vec<&'a ClassRecord>,
}

impl ClassesArgs {
    /// Execute the classes command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let overrides = EngineOverrides {
            engine_root: self.engine_root.clone(),
            engine_source: self.engine_source.clone(),
        };
        let project = ProjectContext::discover(&self.project_dir, &config, &overrides)?;

        let scanner =
            SourceScanner::new().with_extensions(config.generation.header_extensions.iter());
        let index = ClassIndex::build(&scanner, &project.index_roots())?;
        let classes = index.matching(&self.filter);

        if self.json {
            return print_json(&ClassesResponse {
                total: index.len(),
                shown: classes.len(),
                classes,
            });
        }

        if classes.is_empty() {
            println!("No classes found.");
            return Ok(());
        }

        let width = classes
            .iter()
            .map(|record| record.class_name.len())
            .max()
            .unwrap_or(0);
        for record in &classes {
            println!(
                "{:<width$}  : {:<24}  {}",
                record.class_name,
                record.base_class_name,
                record.source_file_path.display()
            );
        }
        println!();
        println!("{} of {} classes", classes.len(), index.len());

        Ok(())
    }
}
