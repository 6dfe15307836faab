#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use svcman::config::{DaemonConfig, InstallPaths, StartupPolicy};
use svcman::error::CommandError;
use svcman::runner::{CommandOutput, CommandRunner};

/// Scripted command runner recording every command it is asked to execute.
#[derive(Default)]
pub struct FakeRunner {
    commands: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, i32>>,
    stdout: Mutex<HashMap<String, Vec<u8>>>,
}

impl FakeRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Scripts a non-zero exit code for an exact command line.
    pub fn fail_with(&self, command: &str, code: i32) {
        self.failures
            .lock()
            .unwrap()
            .insert(command.to_string(), code);
    }

    /// Scripts stdout bytes for an exact command line.
    pub fn respond_with(&self, command: &str, stdout: Vec<u8>) {
        self.stdout
            .lock()
            .unwrap()
            .insert(command.to_string(), stdout);
    }

    /// Removes any scripted failure for a command line.
    pub fn clear_failure(&self, command: &str) {
        self.failures.lock().unwrap().remove(command);
    }

    /// Every command line issued so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str) -> Result<CommandOutput, CommandError> {
        self.commands.lock().unwrap().push(command.to_string());

        if let Some(code) = self.failures.lock().unwrap().get(command) {
            return Err(CommandError::NonZeroExit {
                command: command.to_string(),
                code: *code,
                stdout: Vec::new(),
                stderr: String::new(),
            });
        }

        let stdout = self
            .stdout
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_default();

        Ok(CommandOutput {
            exit_code: 0,
            stdout,
            stderr: Vec::new(),
        })
    }
}

/// Encodes text the way the service manager emits status output.
pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// A daemon identity rooted in the given working directory.
pub fn daemon_config(workdir: &Path) -> DaemonConfig {
    DaemonConfig {
        name: "cfy-agent".to_string(),
        workdir: workdir.to_path_buf(),
        user: "svc".to_string(),
        service_user: String::new(),
        service_password: String::new(),
        rest_host: "10.0.0.1".to_string(),
        rest_port: 443,
        local_rest_cert_file: "C:/certs/rest.pem".to_string(),
        cluster_settings_path: "C:/cluster/settings.yaml".to_string(),
        log_dir: "C:/logs".to_string(),
        log_level: "info".to_string(),
        log_max_bytes: 5_242_880,
        log_max_history: 7,
        max_workers: 5,
        queue: "tasks".to_string(),
        startup_policy: StartupPolicy::Auto,
        failure_reset_timeout: 60,
        failure_restart_delay: 5000,
        executable_temp_path: None,
        extra_env_path: None,
    }
}

/// Installation paths pointing into the working directory.
pub fn install_paths(workdir: &Path) -> InstallPaths {
    InstallPaths {
        install_dir: workdir.join("runtime"),
    }
}

/// Path of the registration script for the test daemon.
pub fn config_script_path(workdir: &Path) -> PathBuf {
    workdir.join("cfy-agent.conf.ps1")
}
