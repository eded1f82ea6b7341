//! Shared types for CLI commands: errors, exit codes, and output helpers.

use crate::error::ClassGenError;
use serde::Serialize;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input, missing project, unknown base class, ...
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
    /// The user or a cancellation flag stopped the operation
    Cancelled = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Exit code category
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Invalid input or project state (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Operation cancelled (exit code 3).
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Cancelled,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ClassGenError> for CliError {
    fn from(err: ClassGenError) -> Self {
        match err {
            ClassGenError::Cancelled => Self::cancelled(err.to_string()),
            _ if err.is_user_facing() => Self::validation(err.to_string()),
            _ => Self::io(err.to_string()),
        }
    }
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("x").exit_code(), 1);
        assert_eq!(CliError::io("x").exit_code(), 2);
        assert_eq!(CliError::cancelled("x").exit_code(), 3);
    }

    #[test]
    fn test_from_class_gen_error() {
        let err: CliError = ClassGenError::UnknownBaseClass("AFoo".to_string()).into();
        assert_eq!(err.kind, ExitCode::ValidationError);
        assert!(err.message.contains("AFoo"));

        let err: CliError = ClassGenError::WriteFailed {
            path: PathBuf::from("/p/A.h"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.kind, ExitCode::IoError);

        let err: CliError = ClassGenError::Cancelled.into();
        assert_eq!(err.kind, ExitCode::Cancelled);
    }
}
