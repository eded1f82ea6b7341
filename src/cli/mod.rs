//! CLI command handlers for ueclass.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method returning
//! [`common::CliResult`]. `main` maps errors to process exit codes.

pub mod classes;
pub mod common;
pub mod config;
pub mod new;
pub mod project;

// Re-export types used by main.rs and tests
pub use classes::ClassesArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use new::NewArgs;
pub use project::ProjectArgs;
