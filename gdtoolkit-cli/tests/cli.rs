use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLEAN: &str = "extends Node\n\n\nfunc _ready():\n\tpass\n";

fn script(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

fn gdtoolkit(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gdtoolkit");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn lint_clean_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "clean.gd", CLEAN);

    gdtoolkit(dir.path())
        .arg("lint")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: no problems found"));
}

#[test]
fn lint_reports_problems_with_rule_names() {
    let dir = tempfile::tempdir().unwrap();
    script(&dir, "bad.gd", "func BadName():\n\tpass\n");

    gdtoolkit(dir.path())
        .arg("lint")
        .arg(".")
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("(function-name)")
                .and(predicate::str::contains("bad.gd"))
                .and(predicate::str::contains("Failure: 1 problem(s) found")),
        );
}

#[test]
fn lint_honours_lintrc_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    script(&dir, "gdlintrc", "disabled_rules:\n  - function-name\n");
    let path = script(&dir, "bad.gd", "func BadName():\n\tpass\n");

    gdtoolkit(dir.path()).arg("lint").arg(&path).assert().success();
}

#[test]
fn format_check_flags_unformatted_files() {
    let dir = tempfile::tempdir().unwrap();
    let messy = script(&dir, "messy.gd", "var a=1\n");
    let tidy = script(&dir, "tidy.gd", CLEAN);

    gdtoolkit(dir.path())
        .args(["format", "--check"])
        .arg(&messy)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would reformat"));
    gdtoolkit(dir.path())
        .args(["format", "--check"])
        .arg(&tidy)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&messy).unwrap(), "var a=1\n");
}

#[test]
fn format_rewrites_files_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "messy.gd", "func f( x ):\n    return x+1\n");

    gdtoolkit(dir.path())
        .arg("format")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("reformatted"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "func f(x):\n\treturn x + 1\n"
    );
}

#[test]
fn format_stdout_leaves_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "messy.gd", "var a=1\n");

    gdtoolkit(dir.path())
        .args(["format", "--stdout"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("var a = 1"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "var a=1\n");
}

#[test]
fn format_refuses_files_that_do_not_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "broken.gd", "var = 1\n");

    gdtoolkit(dir.path())
        .arg("format")
        .arg(&path)
        .assert()
        .code(1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "var = 1\n");
}

#[test]
fn parse_prints_tree_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "clean.gd", CLEAN);

    gdtoolkit(dir.path())
        .args(["parse", "--json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("_ready"));
}

#[test]
fn parse_prints_outline() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "clean.gd", CLEAN);

    gdtoolkit(dir.path())
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("class_def clean.gd @1:1").and(predicate::str::contains("func_def _ready")));
}

#[test]
fn parse_dumps_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "clean.gd", CLEAN);

    gdtoolkit(dir.path())
        .args(["parse", "--tokens"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1:1\t").and(predicate::str::contains("<Indent>")));
}

#[test]
fn parse_errors_exit_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "broken.gd", "var = 1\n");

    gdtoolkit(dir.path())
        .arg("parse")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn missing_paths_are_usage_errors() {
    let dir = tempfile::tempdir().unwrap();

    gdtoolkit(dir.path())
        .args(["lint", "nowhere.gd"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}
