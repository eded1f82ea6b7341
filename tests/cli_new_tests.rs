//! End-to-end tests for `ueclass new`.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

mod fixtures;
use fixtures::*;

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute command")
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for command")
}

fn new_args<'a>(fx: &'a UnrealFixture, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "new",
        "--project-dir",
        fx.project_root.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--no-regen",
    ];
    args.extend_from_slice(extra);
    args
}

#[test]
fn test_new_public_folder_splits_header_and_source() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--folder", "Public/Chars", "--base", "ACharacter", "--name", "MyPawn"],
    )));

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let header = fx.project_root.join("Source/Public/Chars/MyPawn.h");
    let source = fx.project_root.join("Source/Private/Chars/MyPawn.cpp");
    assert!(header.is_file(), "header should be written");
    assert!(source.is_file(), "implementation should go to Private");

    let header_text = fs::read_to_string(&header).unwrap();
    assert!(header_text.contains("#include \"ACharacter.h\""));
    assert!(header_text.contains("class SHOOTER_API MyPawn : public ACharacter"));
    assert!(!header_text.contains("UCLASS"));

    let source_text = fs::read_to_string(&source).unwrap();
    assert!(source_text.contains("#include \"MyPawn.h\""));
    assert!(source_text.contains("MyPawn::MyPawn()"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created MyPawn : public ACharacter (public)"));
}

#[test]
fn test_new_base_class_lookup_ignores_case() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--folder", "Source/Private", "--base", "apawn", "--name", "AEnemy"],
    )));
    assert_eq!(output.status.code(), Some(0));

    let dir = fx.project_root.join("Source/Private");
    let header_text = fs::read_to_string(dir.join("AEnemy.h")).unwrap();
    assert!(header_text.contains("#include \"Pawn.h\""));
    assert!(header_text.contains(": public APawn"));
    assert!(dir.join("AEnemy.cpp").is_file());
}

#[test]
fn test_new_unknown_base_writes_nothing() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--folder", "Public", "--base", "AMissing", "--name", "MyThing"],
    )));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AMissing"), "stderr: {stderr}");
    assert!(!fx.project_root.join("Source/Public/MyThing.h").exists());
    assert!(!fx.project_root.join("Source/Private/MyThing.cpp").exists());
}

#[test]
fn test_new_outside_project_fails() {
    let fx = unreal_fixture();
    let outside = fx.temp.path().join("NotAProject");
    fs::create_dir_all(&outside).unwrap();

    let output = run(&mut fx.command(&[
        "new",
        "--project-dir",
        outside.to_str().unwrap(),
        "--base",
        "AActor",
        "--name",
        "AThing",
    ]));

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains(".uproject"));
}

#[test]
fn test_new_blank_folder_is_no_selection() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--folder", "", "--base", "AActor", "--name", "AThing"],
    )));

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No valid folder selected."));
}

#[test]
fn test_new_folder_cannot_leave_project() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &[
            "--folder",
            "Source/../../../Evil",
            "--base",
            "AActor",
            "--name",
            "AThing",
        ],
    )));

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not inside the project"));
    assert!(!fx.temp.path().parent().unwrap().join("Evil").exists());
    assert!(!fx.project_root.join("Source/AThing.h").exists());
}

#[test]
fn test_new_project_below_public_folder() {
    let fx = unreal_fixture();
    let project = fx.temp.path().join("Users/Public/Documents/Shooter");
    fs::create_dir_all(&project).unwrap();
    fs::copy(
        fx.project_root.join("Shooter.uproject"),
        project.join("Shooter.uproject"),
    )
    .unwrap();
    let project = project.canonicalize().unwrap();

    let output = run(&mut fx.command(&[
        "new",
        "--project-dir",
        project.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--no-regen",
        "--folder",
        "Public/Chars",
        "--base",
        "ACharacter",
        "--name",
        "MyPawn",
    ]));

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(project.join("Source/Public/Chars/MyPawn.h").is_file());
    assert!(project.join("Source/Private/Chars/MyPawn.cpp").is_file());
    assert!(!fx.temp.path().join("Users/Private").exists());
}

#[test]
fn test_new_invalid_class_name() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--base", "AActor", "--name", "My Thing"],
    )));

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid class name"));
}

#[test]
fn test_new_dry_run_json() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &[
            "--folder",
            "Shooter/Public/Weapons",
            "--base",
            "AShooterWeapon",
            "--name",
            "ARifle",
            "--module-api",
            "WEAPONS_API",
            "--dry-run",
            "--json",
        ],
    )));
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["written"], false);
    assert_eq!(result["placement"], "public");
    assert_eq!(result["base_class"], "AShooterWeapon");
    assert!(result["files"]["header_content"]
        .as_str()
        .unwrap()
        .contains("class WEAPONS_API ARifle : public AShooterWeapon"));
    assert!(result["files"]["impl_path"]
        .as_str()
        .unwrap()
        .ends_with("ARifle.cpp"));

    assert!(!fx
        .project_root
        .join("Source/Shooter/Public/Weapons/ARifle.h")
        .exists());
}

#[test]
fn test_new_refuses_to_overwrite_without_force() {
    let fx = unreal_fixture();
    let args = new_args(&fx, &["--base", "AActor", "--name", "AThing"]);

    assert_eq!(run(&mut fx.command(&args)).status.code(), Some(0));
    let header = fx.project_root.join("Source/AThing.h");
    fs::write(&header, "// edited").unwrap();

    let output = run(&mut fx.command(&args));
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));
    assert_eq!(fs::read_to_string(&header).unwrap(), "// edited");

    let mut forced = args.clone();
    forced.push("--force");
    assert_eq!(run(&mut fx.command(&forced)).status.code(), Some(0));
    assert_ne!(fs::read_to_string(&header).unwrap(), "// edited");
}

#[test]
fn test_new_interactive_prompt() {
    let fx = unreal_fixture();
    let cmd = fx.command(&new_args(&fx, &["--folder", "Public"]));
    let output = run_with_stdin(cmd, "character\n1\n  AHero  \n");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1) ACharacter"), "prompt should list matches");

    let header_text = fs::read_to_string(fx.project_root.join("Source/Public/AHero.h")).unwrap();
    assert!(header_text.contains("class SHOOTER_API AHero : public ACharacter"));
    assert!(fx.project_root.join("Source/Private/AHero.cpp").is_file());
}

#[test]
fn test_new_interactive_cancel() {
    let fx = unreal_fixture();
    let cmd = fx.command(&new_args(&fx, &["--base", "AActor"]));
    let output = run_with_stdin(cmd, "\n");

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cancelled"));
    assert!(!fx.project_root.join("Source").join("Private").exists());
}

#[test]
fn test_new_reflected_class_is_indexed_afterwards() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--base", "AActor", "--name", "APickup", "--reflected"],
    )));
    assert_eq!(output.status.code(), Some(0));

    let output = run(&mut fx.command(&[
        "classes",
        "--project-dir",
        fx.project_root.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--filter",
        "pickup",
        "--json",
    ]));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["shown"], 1);
    assert_eq!(result["classes"][0]["class_name"], "APickup");
    assert_eq!(result["classes"][0]["base_class_name"], "AActor");
}

#[test]
fn test_new_plain_class_is_not_indexed_afterwards() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&new_args(
        &fx,
        &["--base", "AActor", "--name", "APlain"],
    )));
    assert_eq!(output.status.code(), Some(0));

    let output = run(&mut fx.command(&[
        "classes",
        "--project-dir",
        fx.project_root.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--filter",
        "APlain",
        "--json",
    ]));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["shown"], 0);
}

#[cfg(unix)]
#[test]
fn test_new_runs_project_file_generator() {
    let fx = unreal_fixture();
    let marker = fx.install_generate_script();

    let output = run(&mut fx.command(&[
        "new",
        "--project-dir",
        fx.project_root.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--base",
        "AActor",
        "--name",
        "ADoor",
    ]));
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Project files regenerated."));

    let args = fs::read_to_string(marker).unwrap();
    let descriptor = fx.project_root.join("Shooter.uproject");
    assert!(args.contains(&format!("-project={}", descriptor.display())));
    assert!(args.trim_end().ends_with("-game -engine"));
}

#[test]
fn test_new_missing_generator_is_only_a_warning() {
    let fx = unreal_fixture();
    let output = run(&mut fx.command(&[
        "new",
        "--project-dir",
        fx.project_root.to_str().unwrap(),
        "--engine-root",
        fx.engine_root.to_str().unwrap(),
        "--base",
        "AActor",
        "--name",
        "AWindow",
    ]));

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("GenerateProjectFiles"));
    assert!(fx.project_root.join("Source/AWindow.h").is_file());
}
