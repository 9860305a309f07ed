use assert_cmd::Command;

const BIN: &str = "safarctl";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_help_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("help").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_list_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").assert().failure();
}

#[test]
fn test_list_providers() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").arg("providers").assert().success();
}

#[test]
fn test_plan_missing_to() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("plan").arg("--from").arg("majestic").assert().failure();
}

#[test]
fn test_plan_from_conflicts_with_at() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("plan")
        .arg("--from")
        .arg("majestic")
        .arg("--at")
        .arg("12.9716,77.5946")
        .arg("--to")
        .arg("airport")
        .assert()
        .failure();
}

#[test]
fn test_plan_launch_requires_book() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("plan")
        .arg("--at")
        .arg("12.9716,77.5946")
        .arg("--to")
        .arg("airport")
        .arg("--launch")
        .assert()
        .failure();
}

#[test]
fn test_login_missing_credentials() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("login").assert().failure();
}

#[test]
fn test_login_google_conflicts_with_email() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("login")
        .arg("--google")
        .arg("TOKEN")
        .arg("-u")
        .arg("a@b.c")
        .assert()
        .failure();
}

#[test]
fn test_completion() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("completion").arg("zsh").assert().success();
}
