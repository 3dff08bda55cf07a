#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use cbuild::{BinLayout, BuildError, Orchestrator, Platform, ProjectPaths, ShellRunner, Toolchain};

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

fn project(exe_body: &str) -> (tempfile::TempDir, Orchestrator<ShellRunner>) {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    std::fs::create_dir(&bin).unwrap();
    write_script(&bin.join("src"), exe_body);

    let paths = ProjectPaths::new(dir.path(), BinLayout::Root).unwrap();
    let orch = Orchestrator::new(paths, Toolchain::new(Platform::Unix, "src"), ShellRunner);
    (dir, orch)
}

#[test]
fn executable_runs_from_bin_dir() {
    let (dir, mut orch) = project("pwd > ran_here");
    orch.run_executable().unwrap();

    let recorded = std::fs::read_to_string(dir.path().join("bin").join("ran_here")).unwrap();
    let expected = dir.path().join("bin").canonicalize().unwrap();
    assert_eq!(Path::new(recorded.trim()).canonicalize().unwrap(), expected);
}

#[test]
fn failing_executable_reports_its_exit_code() {
    let (_dir, mut orch) = project("exit 42");
    let err = orch.run_executable().unwrap_err();
    assert!(matches!(
        err,
        BuildError::StepFailed { ref command, exit_code: 42 } if command == "./src"
    ));
}

#[test]
fn missing_executable_is_a_step_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("bin")).unwrap();
    let paths = ProjectPaths::new(dir.path(), BinLayout::Root).unwrap();
    let mut orch = Orchestrator::new(paths, Toolchain::new(Platform::Unix, "src"), ShellRunner);

    // sh reports 127 for a command it cannot find
    assert_eq!(orch.run_executable().unwrap_err().exit_code(), Some(127));
}

#[test]
fn missing_bin_dir_names_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ProjectPaths::new(dir.path(), BinLayout::Root).unwrap();
    let mut orch = Orchestrator::new(paths, Toolchain::new(Platform::Unix, "src"), ShellRunner);

    let err = orch.run_executable().unwrap_err();
    assert!(matches!(err, BuildError::Io { ref path, .. } if *path == dir.path().join("bin")));
}
