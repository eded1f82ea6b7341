//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_BINARY_NAME, CONFIG_DIR_ENV};
use crate::parser::source_scanner::DEFAULT_HEADER_EXTENSIONS;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Unreal Engine installation root (the directory containing `Engine/`)
    pub engine_root: Option<PathBuf>,
}

/// Code generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Module export macro for generated classes (e.g., "MYGAME_API").
    ///
    /// When unset, the macro is derived from the project's first module.
    pub module_api: Option<String>,
    /// Header extensions to scan, without the dot
    pub header_extensions: Vec<String>,
    /// Run the engine's project-file generator after writing files
    pub regenerate_project_files: bool,
    /// Emit `UCLASS()`/`GENERATED_BODY()` in generated headers
    pub reflected: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            module_api: None,
            header_extensions: DEFAULT_HEADER_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            regenerate_project_files: true,
            reflected: false,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ueclass/config.toml`
/// - macOS: `~/Library/Application Support/ueclass/config.toml`
/// - Windows: `%APPDATA%\ueclass\config.toml`
///
/// `UECLASS_CONFIG_DIR` overrides the directory.
///
/// # Engines
///
/// The `[engines]` table maps a descriptor's `EngineAssociation` value (a version
/// such as `"5.3"` or a source-build GUID) to an installation root:
///
/// ```toml
/// [engines]
/// "5.3" = "C:/Program Files/Epic Games/UE_5.3"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Engine association → installation root
    pub engines: BTreeMap<String, PathBuf>,
    /// Code generation settings
    pub generation: GenerationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `UECLASS_CONFIG_DIR` when set, otherwise the platform config directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Parses and validates configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `module_api` (if set) is a C++ identifier
    /// - `header_extensions` is non-empty and has no blank entries
    /// - engine association keys are non-empty
    pub fn validate(&self) -> Result<()> {
        if let Some(api) = &self.generation.module_api {
            validate_macro_name(api)?;
        }

        if self.generation.header_extensions.is_empty() {
            anyhow::bail!("generation.header_extensions must list at least one extension");
        }

        if let Some(blank) = self
            .generation
            .header_extensions
            .iter()
            .find(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            anyhow::bail!("generation.header_extensions contains an empty entry: '{blank}'");
        }

        if self.engines.keys().any(|key| key.trim().is_empty()) {
            anyhow::bail!("engines table contains an empty association key");
        }

        Ok(())
    }

    /// Registers an engine installation for an association value.
    pub fn set_engine(&mut self, association: &str, root: PathBuf) -> Result<()> {
        let association = association.trim();
        if association.is_empty() {
            anyhow::bail!("Engine association cannot be empty");
        }
        self.engines.insert(association.to_string(), root);
        Ok(())
    }
}

/// Checks that `name` can be used as an export macro.
pub fn validate_macro_name(name: &str) -> Result<()> {
    let macro_regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    if !macro_regex.is_match(name) {
        anyhow::bail!("Module API macro '{name}' is not a valid C++ identifier");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.engine_root, None);
        assert!(config.engines.is_empty());
        assert_eq!(config.generation.module_api, None);
        assert_eq!(config.generation.header_extensions, vec!["h".to_string()]);
        assert!(config.generation.regenerate_project_files);
        assert!(!config.generation.reflected);
    }

    #[test]
    fn test_config_validate() {
        assert!(Config::new().validate().is_ok());

        let mut config = Config::new();
        config.generation.module_api = Some("MYGAME_API".to_string());
        assert!(config.validate().is_ok());

        config.generation.module_api = Some("MY GAME".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.generation.header_extensions.clear();
        assert!(config.validate().is_err());

        config.generation.header_extensions = vec!["h".to_string(), ".".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
[engines]
"5.3" = "/opt/UE_5.3"

[generation]
module_api = "SHOOTER_API"
"#,
        )
        .unwrap();

        assert_eq!(
            config.engines.get("5.3"),
            Some(&PathBuf::from("/opt/UE_5.3"))
        );
        assert_eq!(config.generation.module_api.as_deref(), Some("SHOOTER_API"));
        assert_eq!(config.generation.header_extensions, vec!["h".to_string()]);
        assert!(config.generation.regenerate_project_files);
        assert_eq!(config.paths.engine_root, None);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::new();
        config.paths.engine_root = Some(PathBuf::from("/opt/UnrealEngine"));
        config.set_engine("5.4", PathBuf::from("/opt/UE_5.4")).unwrap();
        config.generation.reflected = true;

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_set_engine_rejects_blank_association() {
        let mut config = Config::new();
        assert!(config.set_engine("  ", PathBuf::from("/x")).is_err());
    }
}
