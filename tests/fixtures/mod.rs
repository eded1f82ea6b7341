//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the ueclass binary
pub fn ueclass_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ueclass")
}

/// Writes a header declaring `class_name : public base` with a `UCLASS` marker.
pub fn write_uclass_header(dir: &Path, file: &str, class_name: &str, base: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(file);
    fs::write(
        &path,
        format!(
            "#pragma once\n\n#include \"CoreMinimal.h\"\n\nUCLASS(BlueprintType)\nclass ENGINE_API {class_name} : public {base}\n{{\n    GENERATED_BODY()\n}};\n"
        ),
    )
    .unwrap();
    path
}

/// An engine installation and a project side by side in a temp directory.
///
/// ```text
/// <temp>/UE_5.3/Engine/Source/Runtime/...   engine classes
/// <temp>/Shooter/Shooter.uproject           EngineAssociation "5.3", module "Shooter"
/// <temp>/Shooter/Source/Shooter/...         project classes
/// <temp>/config/                            isolated UECLASS_CONFIG_DIR
/// ```
pub struct UnrealFixture {
    pub temp: TempDir,
    pub engine_root: PathBuf,
    pub project_root: PathBuf,
    pub config_dir: PathBuf,
}

impl UnrealFixture {
    /// Engine source root that gets indexed.
    pub fn engine_source(&self) -> PathBuf {
        self.engine_root.join("Engine").join("Source")
    }

    /// A command with an isolated config directory and no inherited log filter.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(ueclass_bin());
        cmd.env("UECLASS_CONFIG_DIR", &self.config_dir);
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Installs a fake project-file generator that records its arguments.
    ///
    /// Returns the file the script writes to.
    #[cfg(unix)]
    pub fn install_generate_script(&self) -> PathBuf {
        let batch_dir = self
            .engine_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles");
        fs::create_dir_all(&batch_dir).unwrap();

        let marker = self.temp.path().join("regen-args.txt");
        fs::write(
            batch_dir.join("GenerateProjectFiles.sh"),
            format!("#!/bin/sh\necho \"$@\" > \"{}\"\n", marker.display()),
        )
        .unwrap();
        marker
    }
}

/// Creates an engine with a few classes and a project that uses it.
pub fn unreal_fixture() -> UnrealFixture {
    let temp = TempDir::new().unwrap();

    let engine_root = temp.path().join("UE_5.3");
    let runtime = engine_root.join("Engine").join("Source").join("Runtime");
    let game_framework = runtime
        .join("Engine")
        .join("Classes")
        .join("GameFramework");
    write_uclass_header(&game_framework, "Actor.h", "AActor", "UObject");
    write_uclass_header(&game_framework, "Pawn.h", "APawn", "AActor");
    write_uclass_header(&game_framework, "ACharacter.h", "ACharacter", "APawn");
    write_uclass_header(
        &runtime.join("UMG").join("Public").join("Blueprint"),
        "UserWidget.h",
        "UUserWidget",
        "UWidget",
    );
    // Plain C++ class, must never be indexed
    fs::write(
        runtime.join("Engine").join("Classes").join("Helpers.h"),
        "class FHelper : public FNoncopyable\n{\n};\n",
    )
    .unwrap();

    let project_root = temp.path().join("Shooter");
    fs::create_dir_all(&project_root).unwrap();
    fs::write(
        project_root.join("Shooter.uproject"),
        r#"{
    "FileVersion": 3,
    "EngineAssociation": "5.3",
    "Modules": [
        { "Name": "Shooter", "Type": "Runtime", "LoadingPhase": "Default" }
    ]
}
"#,
    )
    .unwrap();
    write_uclass_header(
        &project_root
            .join("Source")
            .join("Shooter")
            .join("Public")
            .join("Weapons"),
        "ShooterWeapon.h",
        "AShooterWeapon",
        "AActor",
    );

    let config_dir = temp.path().join("config");

    let engine_root = engine_root.canonicalize().unwrap();
    let project_root = project_root.canonicalize().unwrap();

    UnrealFixture {
        temp,
        engine_root,
        project_root,
        config_dir,
    }
}
