use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd(temp: &TempDir) -> Command {
    let config = temp.path().join("config.yaml");
    fs::write(&config, "color: false\n").unwrap();

    let mut cmd = Command::cargo_bin("todostore").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("todostore"));
}

#[test]
fn shell_reads_piped_commands() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("shell")
        .write_stdin("name Buy milk\ndesc 2%\nsubmit\ndone 0\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0]  Buy milk - 2% - Status: Complete"));
}

#[test]
fn run_script_prints_final_list() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("tasks.todo");
    fs::write(
        &script,
        "# two tasks, then edit the second\n\
         name Buy milk\n\
         submit\n\
         name Pay bills\n\
         submit\n\
         edit 1\n\
         name Pay rent\n\
         submit\n\
         delete 9\n",
    )
    .unwrap();

    cmd(&temp)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("error: line 9: index 9 out of range"))
        .stdout(predicate::str::contains("[1]  Pay rent"))
        .stdout(predicate::str::contains("2 tasks: 0 complete, 2 incomplete | filter: all"));
}

#[test]
fn missing_config_fails() {
    let temp = TempDir::new().unwrap();
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("todostore").unwrap();
    cmd.arg("--config")
        .arg(temp.path().join("nope.yaml"))
        .arg("shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
