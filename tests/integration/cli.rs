use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn svcman() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("svcman"))
}

#[test]
fn help_lists_lifecycle_subcommands() {
    svcman()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("install")
                .and(predicate::str::contains("start"))
                .and(predicate::str::contains("stop"))
                .and(predicate::str::contains("status"))
                .and(predicate::str::contains("disable"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn missing_config_file_is_reported() {
    svcman()
        .arg("status")
        .arg("--config")
        .arg("/nonexistent/daemon.yaml")
        .assert()
        .failure();
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempdir().expect("create tempdir");
    let config_path = dir.path().join("daemon.yaml");
    fs::write(&config_path, "not: [valid").expect("write config");

    svcman()
        .arg("start")
        .arg("--config")
        .arg(config_path.as_os_str())
        .assert()
        .failure();
}

#[test]
#[cfg(unix)]
fn status_of_unreachable_service_manager_reports_not_running() {
    // On a host without `sc`, the status query fails and must downgrade to
    // "not running" with the LSB not-running exit code instead of erroring.
    let dir = tempdir().expect("create tempdir");
    let config_path = dir.path().join("daemon.yaml");
    fs::write(
        &config_path,
        r#"
name: "cfy-agent"
workdir: "/tmp"
user: "svc"
rest_host: "10.0.0.1"
rest_port: 443
queue: "tasks"
"#,
    )
    .expect("write config");

    svcman()
        .arg("status")
        .arg("--config")
        .arg(config_path.as_os_str())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("cfy-agent: not running"));
}
