//! Running the engine's project-file generator after new sources are written.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Generator script name.
#[cfg(windows)]
pub const GENERATE_SCRIPT: &str = "GenerateProjectFiles.bat";
/// Generator script name.
#[cfg(not(windows))]
pub const GENERATE_SCRIPT: &str = "GenerateProjectFiles.sh";

/// Result of a regeneration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenOutcome {
    /// The script ran and exited successfully
    Completed,
    /// The engine root has no generator script
    ScriptMissing(PathBuf),
    /// The script ran and exited with a failure
    Failed {
        /// Exit code, if the process produced one
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },
}

/// Refreshes IDE project files so new sources show up.
pub trait ProjectFileRegenerator {
    /// Regenerates project files for `descriptor` using the engine at `engine_root`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started.
    fn regenerate(&self, engine_root: &Path, descriptor: &Path) -> Result<RegenOutcome>;
}

/// Runs `GenerateProjectFiles` from the engine root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptRegenerator;

impl ScriptRegenerator {
    /// `<engine root>/Engine/Build/BatchFiles/GenerateProjectFiles.*`
    #[must_use]
    pub fn script_path(engine_root: &Path) -> PathBuf {
        engine_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join(GENERATE_SCRIPT)
    }

    /// Command line for regenerating `descriptor`.
    #[must_use]
    pub fn build_command(engine_root: &Path, descriptor: &Path) -> Command {
        let script = Self::script_path(engine_root);

        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&script);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg(&script);
            cmd
        };

        cmd.arg(format!("-project={}", descriptor.display()))
            .arg("-game")
            .arg("-engine")
            .current_dir(engine_root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl ProjectFileRegenerator for ScriptRegenerator {
    fn regenerate(&self, engine_root: &Path, descriptor: &Path) -> Result<RegenOutcome> {
        let script = Self::script_path(engine_root);
        if !script.is_file() {
            warn!("Project file generator not found at {}", script.display());
            return Ok(RegenOutcome::ScriptMissing(script));
        }

        info!("Running {} for {}", script.display(), descriptor.display());
        let output = Self::build_command(engine_root, descriptor)
            .output()
            .with_context(|| format!("Failed to execute {}", script.display()))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!("{line}");
        }

        if output.status.success() {
            Ok(RegenOutcome::Completed)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "Project file generation failed ({}): {stderr}",
                output.status
            );
            Ok(RegenOutcome::Failed {
                status: output.status.code(),
                stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_script() {
        let temp = TempDir::new().unwrap();
        let outcome = ScriptRegenerator
            .regenerate(temp.path(), &temp.path().join("Game.uproject"))
            .unwrap();
        assert_eq!(
            outcome,
            RegenOutcome::ScriptMissing(ScriptRegenerator::script_path(temp.path()))
        );
    }

    #[test]
    fn test_build_command_arguments() {
        let cmd = ScriptRegenerator::build_command(
            Path::new("/UE"),
            Path::new("/Projects/Game/Game.uproject"),
        );
        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert!(args.contains(&"-project=/Projects/Game/Game.uproject".to_string()));
        assert!(args.ends_with(&["-game".to_string(), "-engine".to_string()]));
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/UE")));
    }

    #[cfg(unix)]
    #[test]
    fn test_script_runs_and_reports_status() {
        let temp = TempDir::new().unwrap();
        let descriptor = temp.path().join("Game.uproject");
        let script = ScriptRegenerator::script_path(temp.path());
        std::fs::create_dir_all(script.parent().unwrap()).unwrap();

        std::fs::write(
            &script,
            "#!/bin/sh\ncase \"$1\" in -project=*) exit 0;; esac\necho bad args >&2\nexit 3\n",
        )
        .unwrap();
        assert_eq!(
            ScriptRegenerator.regenerate(temp.path(), &descriptor).unwrap(),
            RegenOutcome::Completed
        );

        std::fs::write(
            &script,
            "#!/bin/sh\necho broken >&2\nexit 4\n",
        )
        .unwrap();
        let outcome = ScriptRegenerator.regenerate(temp.path(), &descriptor).unwrap();
        assert_eq!(
            outcome,
            RegenOutcome::Failed {
                status: Some(4),
                stderr: "broken".to_string()
            }
        );
    }
}
