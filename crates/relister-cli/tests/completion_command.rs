use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_relister_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("relister")
}

#[test]
fn test_completion_command_help() {
    let mut cmd = Command::new(get_relister_bin());
    cmd.arg("completion").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Generate shell completion scripts",
        ))
        .stdout(predicate::str::contains("SUPPORTED SHELLS"))
        .stdout(predicate::str::contains("INSTALLATION"))
        .stdout(predicate::str::contains("~/.bashrc"));
}

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = Command::new(get_relister_bin());
    cmd.arg("completion").arg("--shell").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_relister()"))
        .stdout(predicate::str::contains("complete -F _relister"));
}

#[test]
fn test_completion_zsh_generates_script() {
    let mut cmd = Command::new(get_relister_bin());
    cmd.arg("completion").arg("--shell").arg("zsh");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef relister"));
}

#[test]
fn test_completion_fish_covers_subcommands() {
    let mut cmd = Command::new(get_relister_bin());
    cmd.arg("completion").arg("--shell").arg("fish");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("complete -c relister"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_completion_rejects_unknown_shell() {
    let mut cmd = Command::new(get_relister_bin());
    cmd.arg("completion").arg("--shell").arg("tcsh");

    cmd.assert().failure();
}
