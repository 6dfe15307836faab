#[path = "common/mod.rs"]
mod common;

use std::{fs, io::Write, sync::Arc};

use common::{FakeRunner, config_script_path, daemon_config, install_paths};
use svcman::backend::ServiceBackend;
use svcman::config::StartupPolicy;
use svcman::error::DaemonError;
use svcman::service::WinServiceManager;
use svcman::template::EmbeddedRenderer;
use tempfile::tempdir;

fn manager(
    workdir: &std::path::Path,
    runner: Arc<FakeRunner>,
) -> WinServiceManager {
    WinServiceManager::new(
        daemon_config(workdir),
        install_paths(workdir),
        runner,
        Arc::new(EmbeddedRenderer::new()),
    )
}

#[test]
fn install_materializes_both_artifacts_and_runs_the_script() {
    let dir = tempdir().unwrap();
    let runner = FakeRunner::new();
    let svc = manager(dir.path(), Arc::clone(&runner));

    svc.create_config().unwrap();

    // Environment side-channel file.
    let env_path = dir.path().join("environment.json");
    let env: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&env_path).unwrap()).unwrap();
    assert_eq!(env["MANAGER_FILE_SERVER_URL"], "https://10.0.0.1:443/resources");
    assert_eq!(env["AGENT_LOG_LEVEL"], "INFO");
    assert_eq!(env["DAEMON_USER"], "svc");

    // Rendered registration script.
    let script_path = config_script_path(dir.path());
    let script = fs::read_to_string(&script_path).unwrap();
    assert!(script.contains(r#"$serviceName = "cfy-agent""#));
    assert!(script.contains("start= auto"));
    assert!(script.contains("reset= 60"));
    assert!(script.contains("restart/5000"));
    assert!(script.contains(&env_path.to_string_lossy().into_owned()));

    // The script itself was executed through the runner.
    assert_eq!(
        runner.commands(),
        vec![script_path.to_string_lossy().into_owned()]
    );
}

#[test]
fn install_twice_overwrites_cleanly() {
    let dir = tempdir().unwrap();
    let runner = FakeRunner::new();
    let svc = manager(dir.path(), Arc::clone(&runner));

    svc.create_config().unwrap();
    svc.create_config().unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    let artifacts: Vec<_> = entries
        .iter()
        .filter(|name| name.ends_with(".json") || name.ends_with(".ps1"))
        .collect();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(runner.commands().len(), 2);
}

#[test]
fn every_startup_policy_produces_a_config_script() {
    let dir = tempdir().unwrap();

    for policy in [
        StartupPolicy::Boot,
        StartupPolicy::System,
        StartupPolicy::Auto,
        StartupPolicy::Demand,
        StartupPolicy::Disabled,
    ] {
        let runner = FakeRunner::new();
        let mut config = daemon_config(dir.path());
        config.startup_policy = policy;
        let svc = WinServiceManager::new(
            config,
            install_paths(dir.path()),
            Arc::<FakeRunner>::clone(&runner),
            Arc::new(EmbeddedRenderer::new()),
        );

        svc.create_config().unwrap();
        let script = fs::read_to_string(config_script_path(dir.path())).unwrap();
        assert!(script.contains(&format!("start= {}", policy.as_ref())));
    }
}

#[test]
fn extra_env_overrides_flow_into_the_environment_file() {
    let dir = tempdir().unwrap();
    let extra_path = dir.path().join("extra.bat");
    let mut extra = fs::File::create(&extra_path).unwrap();
    writeln!(extra, "set FOO=bar").unwrap();
    writeln!(extra, "set DAEMON_USER=other").unwrap();
    writeln!(extra, "this line is ignored").unwrap();

    let runner = FakeRunner::new();
    let mut config = daemon_config(dir.path());
    config.extra_env_path = Some(extra_path);
    let svc = WinServiceManager::new(
        config,
        install_paths(dir.path()),
        Arc::<FakeRunner>::clone(&runner),
        Arc::new(EmbeddedRenderer::new()),
    );

    svc.create_config().unwrap();

    let env: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("environment.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(env["FOO"], "bar");
    assert_eq!(env["DAEMON_USER"], "other");
}

#[test]
fn configuration_script_failure_is_surfaced() {
    let dir = tempdir().unwrap();
    let runner = FakeRunner::new();
    let script_path = config_script_path(dir.path());
    runner.fail_with(&script_path.to_string_lossy(), 1);

    let svc = manager(dir.path(), Arc::clone(&runner));
    let err = svc.create_config().unwrap_err();
    assert!(matches!(err, DaemonError::Command(_)));

    // Both artifacts were still written before the script ran.
    assert!(dir.path().join("environment.json").exists());
    assert!(script_path.exists());
}

#[test]
fn service_account_is_passed_through_verbatim() {
    let dir = tempdir().unwrap();
    let runner = FakeRunner::new();
    let mut config = daemon_config(dir.path());
    config.service_user = r".\svc-account".to_string();
    config.service_password = "hunter2".to_string();
    let svc = WinServiceManager::new(
        config,
        install_paths(dir.path()),
        Arc::<FakeRunner>::clone(&runner),
        Arc::new(EmbeddedRenderer::new()),
    );

    svc.create_config().unwrap();

    let script = fs::read_to_string(config_script_path(dir.path())).unwrap();
    assert!(script.contains(r#"obj= ".\svc-account" password= "hunter2""#));
}
