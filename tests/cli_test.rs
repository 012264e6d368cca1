use std::fs::{self, File, create_dir_all};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    create_dir_all(path.parent().unwrap()).unwrap();
    File::create(path).unwrap();
}

fn fdispatch(working_dir: &Path) -> Command {
    let mut command = Command::cargo_bin("fdispatch").unwrap();
    command.current_dir(working_dir);
    command
}

#[test]
fn test_missing_source_directory_exits_with_one() {
    let temp_dir = tempdir().unwrap();

    fdispatch(temp_dir.path())
        .args(["missing", "cp"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("not found or is not a directory"));
}

#[test]
fn test_missing_command_is_an_argument_error() {
    let temp_dir = tempdir().unwrap();
    create_dir_all(temp_dir.path().join("src")).unwrap();

    fdispatch(temp_dir.path()).arg("src").assert().failure();
}

#[test]
fn test_zero_matches_is_success() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a.txt");

    fdispatch(temp_dir.path())
        .args(["src", "--file-pattern", "*.nomatch", "cp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exiting."));

    assert!(!temp_dir.path().join("processed").exists());
}

#[cfg(unix)]
#[test]
fn test_dry_run_prints_without_executing() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a/x.txt");

    fdispatch(temp_dir.path())
        .args(["src", "-d", "definitely-not-a-real-program-3141", "--flag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Dry run: Command not executed)"))
        .stdout(predicate::str::contains(
            "definitely-not-a-real-program-3141 --flag src/a/x.txt processed/a/p_x.txt",
        ))
        .stdout(predicate::str::contains("not found").not());

    assert!(temp_dir.path().join("processed/a").is_dir());
}

#[cfg(unix)]
#[test]
fn test_echo_end_to_end() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a/x.txt");
    touch(temp_dir.path(), "src/a/b/y.txt");

    fdispatch(temp_dir.path())
        .args(["src", "-pt", "*.txt", "-ofp", "new_", "-osd", "out", "-v", "echo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("echo src/a/x.txt out/a/new_x.txt"))
        .stdout(predicate::str::contains("echo src/a/b/y.txt out/a/b/new_y.txt"))
        .stdout(predicate::str::contains("STDOUT: src/a/x.txt out/a/new_x.txt"))
        .stdout(predicate::str::contains(
            "Summary: Found 2 files, successfully processed 2.",
        ));
}

#[cfg(unix)]
#[test]
fn test_failing_command_does_not_stop_the_run() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a.txt");
    touch(temp_dir.path(), "src/b.txt");

    fdispatch(temp_dir.path())
        .args(["src", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error executing command (exit code 1)"))
        .stdout(predicate::str::contains(
            "Summary: Found 2 files, successfully processed 2.",
        ));
}

#[cfg(unix)]
#[test]
fn test_config_file_provides_defaults() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/keep.txt");
    touch(temp_dir.path(), "src/skip.md");
    fs::write(
        temp_dir.path().join("defaults.yaml"),
        "file_pattern: \"*.txt\"\noutput_file_prefix: cfg_\noutput_basedir: results\n",
    )
    .unwrap();

    fdispatch(temp_dir.path())
        .args(["-c", "defaults.yaml", "-d", "src", "cp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cp src/keep.txt results/cfg_keep.txt"))
        .stdout(predicate::str::contains("skip.md").not());
}

#[test]
fn test_missing_config_file_is_fatal() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/keep.txt");

    fdispatch(temp_dir.path())
        .args(["-c", "nope.yaml", "src", "cp"])
        .assert()
        .code(1);
}

#[test]
fn test_log_file_receives_records() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a.txt");

    fdispatch(temp_dir.path())
        .args(["--log-file", "run.log", "-d", "src", "cp"])
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join("run.log")).unwrap();
    assert!(log.contains("Summary: Found 1 files, successfully processed 1."));
}

#[cfg(unix)]
#[test]
fn test_missing_program_report_names_the_command() {
    let temp_dir = tempdir().unwrap();
    touch(temp_dir.path(), "src/a.txt");

    fdispatch(temp_dir.path())
        .args(["src", "definitely-not-a-real-program-3141", "--flag"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Command 'definitely-not-a-real-program-3141' not found",
        ))
        .stdout(predicate::str::contains(
            "    Command: definitely-not-a-real-program-3141 --flag src/a.txt processed/p_a.txt",
        ));
}
