//! UE Class Wizard library
//!
//! Adds C++ classes to Unreal Engine projects: scans engine and project headers
//! for `UCLASS` declarations, builds a case-insensitive class index, resolves a
//! logical folder to its Public/Private location, and renders the header and
//! implementation files.

// Module declarations
pub mod app;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
