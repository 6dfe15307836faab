//! Daemon identity and installation configuration for svcman.
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use strum_macros::{AsRefStr, EnumString};

use crate::constants::{CONFIG_SCRIPT_EXTENSION, ENVIRONMENT_FILE_NAME, STORAGE_DIR_NAME};
use crate::error::ConfigError;

/// Controls how the OS service manager starts the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StartupPolicy {
    /// Loaded by the boot loader.
    Boot,
    /// Started during kernel initialization.
    System,
    /// Started automatically on every boot, even with no one logged on.
    Auto,
    /// Must be started manually.
    Demand,
    /// Cannot be started until the start type is changed.
    Disabled,
}

impl StartupPolicy {
    /// Whether this policy makes the OS start the service at boot time.
    /// Boot-time policies must be disabled before an intentional stop, or the
    /// service manager relaunches the service immediately.
    pub fn starts_at_boot(&self) -> bool {
        matches!(self, Self::Boot | Self::System | Self::Auto)
    }
}

/// Process-wide installation paths, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// Root directory of the daemon runtime installation, referenced by the
    /// rendered registration script.
    pub install_dir: PathBuf,
}

/// Identity and parameters of a single managed daemon, loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Unique service name.
    pub name: String,
    /// Directory owning all generated artifacts.
    pub workdir: PathBuf,
    /// Principal the daemon process runs as.
    pub user: String,
    /// Account the OS service runs under; empty means the default account.
    #[serde(default)]
    pub service_user: String,
    /// Password for `service_user`; passed through verbatim.
    #[serde(default)]
    pub service_password: String,
    /// Host of the REST endpoint the worker reports to.
    pub rest_host: String,
    /// Port of the REST endpoint.
    pub rest_port: u16,
    /// Certificate file used to verify the REST endpoint.
    #[serde(default)]
    pub local_rest_cert_file: String,
    /// Path to the shared cluster settings file.
    #[serde(default)]
    pub cluster_settings_path: String,
    /// Directory the worker writes its logs into.
    #[serde(default)]
    pub log_dir: String,
    /// Worker log verbosity.
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    /// Maximum size of a single worker log file, in bytes.
    #[serde(default = "defaults::log_max_bytes")]
    pub log_max_bytes: u64,
    /// Number of rotated worker log files to retain.
    #[serde(default = "defaults::log_max_history")]
    pub log_max_history: u32,
    /// Maximum number of worker threads.
    #[serde(default = "defaults::max_workers")]
    pub max_workers: u32,
    /// Queue the worker consumes from.
    pub queue: String,
    /// How the OS starts the service.
    #[serde(default = "defaults::startup_policy")]
    pub startup_policy: StartupPolicy,
    /// Seconds without failures after which the failure count resets to zero.
    #[serde(default = "defaults::failure_reset_timeout")]
    pub failure_reset_timeout: u64,
    /// Milliseconds the service manager waits before restarting after failure.
    #[serde(default = "defaults::failure_restart_delay")]
    pub failure_restart_delay: u64,
    /// Override for the temp directory used by executed commands.
    #[serde(default)]
    pub executable_temp_path: Option<String>,
    /// File with additional `set NAME=value` lines to merge into the
    /// environment mapping.
    #[serde(default)]
    pub extra_env_path: Option<PathBuf>,
}

mod defaults {
    use super::StartupPolicy;

    pub fn log_level() -> String {
        "debug".to_string()
    }

    pub fn log_max_bytes() -> u64 {
        5_242_880
    }

    pub fn log_max_history() -> u32 {
        7
    }

    pub fn max_workers() -> u32 {
        5
    }

    pub fn startup_policy() -> StartupPolicy {
        StartupPolicy::Auto
    }

    pub fn failure_reset_timeout() -> u64 {
        60
    }

    pub fn failure_restart_delay() -> u64 {
        5000
    }
}

impl DaemonConfig {
    /// Path of the rendered service-registration script. Its presence on disk
    /// is what distinguishes "configured" from "registered but unconfigured".
    pub fn config_path(&self) -> PathBuf {
        self.workdir
            .join(format!("{}.{}", self.name, CONFIG_SCRIPT_EXTENSION))
    }

    /// Path of the environment side-channel file consumed by the worker.
    pub fn environment_file_path(&self) -> PathBuf {
        self.workdir.join(ENVIRONMENT_FILE_NAME)
    }

    /// File-server URL derived from the REST endpoint parameters.
    pub fn file_server_url(&self) -> String {
        format!("https://{}:{}/resources", self.rest_host, self.rest_port)
    }

    /// Storage directory for daemon state, derived from the daemon user's
    /// profile directory.
    pub fn storage_directory(&self) -> String {
        format!(r"C:\Users\{}\{}", self.user, STORAGE_DIR_NAME)
    }
}

/// Loads and parses a daemon configuration file.
pub fn load_daemon_config(path: &Path) -> Result<DaemonConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::ReadError(std::io::Error::new(
            e.kind(),
            format!("{} ({})", e, path.display()),
        ))
    })?;

    let config: DaemonConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
