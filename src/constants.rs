//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the Unreal file-layout names it relies on.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "UE Class Wizard";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "ueclass";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "UECLASS_CONFIG_DIR";

/// Extension of the project descriptor that marks a project root.
pub const PROJECT_DESCRIPTOR_EXTENSION: &str = "uproject";

/// Top-level group every logical folder hierarchy starts from.
pub const SOURCE_DIR: &str = "Source";

/// Folder name for headers visible to other modules.
pub const PUBLIC_DIR: &str = "Public";

/// Folder name for module-internal sources.
pub const PRIVATE_DIR: &str = "Private";

/// Module export macro used when nothing more specific is known.
pub const DEFAULT_MODULE_API: &str = "MYPROJECT_API";
