//! `ueclass new`: add a class to an Unreal project.

use crate::app::picker::{ArgsPicker, ClassPicker, PromptPicker};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::codegen::{DiskSink, ScriptRegenerator};
use crate::config::{validate_macro_name, Config};
use crate::services::{
    AddClassOutcome, AddClassRequest, AddClassResult, AddClassService, EngineOverrides,
};
use clap::Args;
use std::io;
use std::path::PathBuf;

/// Create a header/source pair deriving from an indexed class
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Directory inside the project (defaults to the current directory)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Destination folder, e.g. Source/Public/Characters ("Source" is optional)
    #[arg(short, long, value_name = "PATH")]
    pub folder: Option<String>,

    /// Base class (prompted for when omitted)
    #[arg(short, long, value_name = "CLASS")]
    pub base: Option<String>,

    /// New class name (prompted for when omitted)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Engine installation root (directory containing Engine/)
    #[arg(long, value_name = "DIR")]
    pub engine_root: Option<PathBuf>,

    /// Engine source tree to index instead of <engine-root>/Engine/Source
    #[arg(long, value_name = "DIR")]
    pub engine_source: Option<PathBuf>,

    /// Export macro for the class declaration (e.g. MYGAME_API)
    #[arg(long, value_name = "MACRO")]
    pub module_api: Option<String>,

    /// Emit UCLASS()/GENERATED_BODY() in the header
    #[arg(long)]
    pub reflected: bool,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Do not regenerate project files afterwards
    #[arg(long)]
    pub no_regen: bool,

    /// Scan engine and project sources in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        if let Some(api) = &self.module_api {
            validate_macro_name(api).map_err(|e| CliError::validation(e.to_string()))?;
        }

        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let request = AddClassRequest {
            project_dir: self.project_dir.clone(),
            folder: self.folder.clone(),
            engine: EngineOverrides {
                engine_root: self.engine_root.clone(),
                engine_source: self.engine_source.clone(),
            },
            module_api: self.module_api.clone(),
            reflected: self.reflected.then_some(true),
            dry_run: self.dry_run,
            overwrite: self.force,
            regenerate: if self.no_regen { Some(false) } else { None },
            parallel_scan: self.parallel,
        };

        let mut picker: Box<dyn ClassPicker> = match (&self.base, &self.name) {
            (Some(base), Some(name)) => Box::new(ArgsPicker::new(base.clone(), name.clone())),
            // Prompts go to stderr so --json output stays clean
            _ => Box::new(
                PromptPicker::new(io::stdin().lock(), io::stderr())
                    .with_base(self.base.clone())
                    .with_name(self.name.clone()),
            ),
        };

        let service = AddClassService::new(&config, &DiskSink, &ScriptRegenerator);
        match service.run(&request, picker.as_mut())? {
            AddClassResult::Created(outcome) => {
                if self.json {
                    print_json(&outcome)?;
                } else {
                    print_summary(&outcome);
                }
                Ok(())
            }
            AddClassResult::Cancelled => Err(CliError::cancelled("Class creation cancelled")),
        }
    }
}

fn print_summary(outcome: &AddClassOutcome) {
    let verb = if outcome.written { "Created" } else { "Would create" };
    println!(
        "{verb} {} : public {} ({})",
        outcome.class_name, outcome.base_class, outcome.placement
    );
    println!("  Header: {}", outcome.files.header_path.display());
    println!("  Source: {}", outcome.files.impl_path.display());

    if !outcome.written {
        println!();
        println!("{}", outcome.files.header_content);
        println!("{}", outcome.files.impl_content);
    }

    match outcome.regenerated {
        Some(true) => println!("Project files regenerated."),
        Some(false) => println!("Project file regeneration failed; see warnings."),
        None => {}
    }
}
