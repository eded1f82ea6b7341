//! Interactive pieces of the application.
//!
//! The core never talks to a terminal; it asks a [`picker::ClassPicker`] for the
//! base class and new class name instead.

/// Base class and class name selection
pub mod picker;

// Re-export commonly used types for convenience
pub use picker::{validate_class_name, ArgsPicker, ClassPicker, PromptPicker, Selection};
