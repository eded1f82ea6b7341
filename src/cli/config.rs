//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{validate_macro_name, Config};
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Register an engine installation for an EngineAssociation value
    Engine(ConfigEngineArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default engine installation root (directory containing Engine/)
    #[arg(long, value_name = "DIR")]
    engine_root: Option<PathBuf>,

    /// Export macro for generated classes (e.g. MYGAME_API)
    #[arg(long, value_name = "MACRO")]
    module_api: Option<String>,

    /// Run GenerateProjectFiles after creating a class (true or false)
    #[arg(long, value_name = "BOOL")]
    regenerate: Option<bool>,

    /// Emit UCLASS()/GENERATED_BODY() in generated headers (true or false)
    #[arg(long, value_name = "BOOL")]
    reflected: Option<bool>,

    /// Header extensions to scan, comma separated (e.g. h,hpp)
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    header_extensions: Option<Vec<String>>,
}

/// Register an engine installation
#[derive(Args, Debug)]
pub struct ConfigEngineArgs {
    /// EngineAssociation value from the .uproject file (e.g. 5.3 or a GUID)
    association: String,

    /// Engine installation root (directory containing Engine/)
    #[arg(value_name = "DIR")]
    root: PathBuf,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    paths: PathsOutput,
    engines: BTreeMap<String, String>,
    generation: GenerationOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    engine_root: Option<String>,
}

#[derive(Serialize, Debug)]
struct GenerationOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    module_api: Option<String>,
    header_extensions: Vec<String>,
    regenerate_project_files: bool,
    reflected: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Engine(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.engine_root.is_none()
            && self.module_api.is_none()
            && self.regenerate.is_none()
            && self.reflected.is_none()
            && self.header_extensions.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --engine-root, --module-api, --regenerate, --reflected, or --header-extensions",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.engine_root {
            validate_engine_root(path)?;
            config.paths.engine_root = Some(path.clone());
        }

        if let Some(api) = &self.module_api {
            validate_macro_name(api).map_err(|e| CliError::validation(e.to_string()))?;
            config.generation.module_api = Some(api.clone());
        }

        if let Some(regenerate) = self.regenerate {
            config.generation.regenerate_project_files = regenerate;
        }

        if let Some(reflected) = self.reflected {
            config.generation.reflected = reflected;
        }

        if let Some(extensions) = &self.header_extensions {
            config.generation.header_extensions = extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .collect();
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

impl ConfigEngineArgs {
    /// Execute engine command
    pub fn execute(&self) -> CliResult<()> {
        validate_engine_root(&self.root)?;

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        config
            .set_engine(&self.association, self.root.clone())
            .map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!(
            "Engine '{}' registered at {}",
            self.association.trim(),
            self.root.display()
        );

        Ok(())
    }
}

fn validate_engine_root(path: &Path) -> CliResult<()> {
    if !path.is_dir() {
        return Err(CliError::validation(format!(
            "Engine directory does not exist: {}",
            path.display()
        )));
    }

    if !path.join("Engine").is_dir() {
        return Err(CliError::validation(format!(
            "Engine directory is invalid: Engine/ not found in {}",
            path.display()
        )));
    }

    Ok(())
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        paths: PathsOutput {
            engine_root: config
                .paths
                .engine_root
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        engines: config
            .engines
            .iter()
            .map(|(assoc, root)| (assoc.clone(), root.to_string_lossy().to_string()))
            .collect(),
        generation: GenerationOutput {
            module_api: config.generation.module_api.clone(),
            header_extensions: config.generation.header_extensions.clone(),
            regenerate_project_files: config.generation.regenerate_project_files,
            reflected: config.generation.reflected,
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    if let Ok(path) = Config::config_file_path() {
        println!("Config file: {}", path.display());
        println!();
    }

    println!("Paths:");
    match &config.paths.engine_root {
        Some(root) => println!("  Engine Root: {}", root.display()),
        None => println!("  Engine Root: (not configured)"),
    }
    println!();

    println!("Engines:");
    if config.engines.is_empty() {
        println!("  (none registered)");
    }
    for (association, root) in &config.engines {
        println!("  {association} => {}", root.display());
    }
    println!();

    println!("Generation:");
    println!(
        "  Module API: {}",
        config
            .generation
            .module_api
            .as_deref()
            .unwrap_or("(from project descriptor)")
    );
    println!(
        "  Header Extensions: {}",
        config.generation.header_extensions.join(", ")
    );
    println!(
        "  Regenerate Project Files: {}",
        config.generation.regenerate_project_files
    );
    println!("  Reflected Headers: {}", config.generation.reflected);
    println!();
}
