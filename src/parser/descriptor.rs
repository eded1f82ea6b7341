//! `.uproject` descriptor parsing.
//!
//! Only a handful of fields matter here: `EngineAssociation` (which engine build
//! the project belongs to) and the module list (used to derive the export macro).
//! Everything else in the document is ignored.

use crate::error::{ClassGenError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of the descriptor's `Modules` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Module name (e.g., "MyGame")
    pub name: String,
    /// Host type (e.g., "Runtime", "Editor")
    pub module_type: Option<String>,
}

/// The parts of a `.uproject` file the generator cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Descriptor file the data came from
    pub path: PathBuf,
    /// Engine identifier: a version like "5.3" or a GUID for source builds
    pub engine_association: Option<String>,
    /// Modules declared by the project, in file order
    pub modules: Vec<ModuleEntry>,
}

impl ProjectDescriptor {
    /// Export macro of the first declared module, e.g. `MYGAME_API` for `MyGame`.
    #[must_use]
    pub fn primary_module_api(&self) -> Option<String> {
        self.modules
            .first()
            .map(|module| format!("{}_API", module.name.to_uppercase()))
    }

    /// Project name: the descriptor file stem.
    #[must_use]
    pub fn project_name(&self) -> Option<String> {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

/// Reads and parses a descriptor from disk.
///
/// # Errors
///
/// Returns [`ClassGenError::DescriptorUnreadable`] if the file cannot be read or
/// is not a JSON object.
pub fn read_descriptor(path: &Path) -> Result<ProjectDescriptor> {
    let content = fs::read_to_string(path).map_err(|e| ClassGenError::DescriptorUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_descriptor_str(&content, path)
}

/// Parses descriptor text.
///
/// Strict JSON is tried first. Hand-edited descriptors with trailing commas or
/// comments are accepted through a JSON5 fallback.
///
/// # Errors
///
/// Returns [`ClassGenError::DescriptorUnreadable`] if neither parser accepts the
/// text or the top level is not an object.
pub fn parse_descriptor_str(content: &str, path: &Path) -> Result<ProjectDescriptor> {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(json_err) => {
            json5::from_str(content).map_err(|_| ClassGenError::DescriptorUnreadable {
                path: path.to_path_buf(),
                reason: json_err.to_string(),
            })?
        }
    };

    let Value::Object(map) = value else {
        return Err(ClassGenError::DescriptorUnreadable {
            path: path.to_path_buf(),
            reason: "top-level value is not an object".to_string(),
        });
    };

    // A non-string association (e.g. null) is treated as absent.
    let engine_association = map
        .get("EngineAssociation")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let modules = map
        .get("Modules")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let name = entry.get("Name")?.as_str()?.to_string();
                    let module_type = entry
                        .get("Type")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    Some(ModuleEntry { name, module_type })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ProjectDescriptor {
        path: path.to_path_buf(),
        engine_association,
        modules,
    })
}
