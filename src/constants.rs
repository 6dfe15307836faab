//! Constants and contract values shared across the svcman daemon.
//!
//! This module centralizes the environment-variable contract consumed by the
//! managed worker process, the `sc` command strings issued against the Windows
//! service registry, and the exit codes that require special interpretation.

// ============================================================================
// Environment-variable contract
// ============================================================================
//
// Key names written into `environment.json` and read by the worker process at
// runtime. These must match the worker's environment contract verbatim.

/// Hostname or address of the REST endpoint the worker reports to.
pub const REST_HOST_KEY: &str = "REST_HOST";

/// Port of the REST endpoint.
pub const REST_PORT_KEY: &str = "REST_PORT";

/// Path to the certificate used to verify the REST endpoint.
pub const LOCAL_REST_CERT_FILE_KEY: &str = "LOCAL_REST_CERT_FILE";

/// Fully derived file-server URL (`https://{host}:{port}/resources`).
pub const MANAGER_FILE_SERVER_URL_KEY: &str = "MANAGER_FILE_SERVER_URL";

/// Directory the worker writes its logs into.
pub const AGENT_LOG_DIR_KEY: &str = "AGENT_LOG_DIR";

/// Worker log verbosity, uppercased.
pub const AGENT_LOG_LEVEL_KEY: &str = "AGENT_LOG_LEVEL";

/// Maximum size of a single worker log file, in bytes.
pub const AGENT_LOG_MAX_BYTES_KEY: &str = "AGENT_LOG_MAX_BYTES";

/// Number of rotated worker log files to retain.
pub const AGENT_LOG_MAX_HISTORY_KEY: &str = "AGENT_LOG_MAX_HISTORY";

/// Working directory owning all generated artifacts.
pub const AGENT_WORK_DIR_KEY: &str = "AGENT_WORK_DIR";

/// Principal the daemon runs as.
pub const DAEMON_USER_KEY: &str = "DAEMON_USER";

/// Per-user storage directory for daemon state.
pub const DAEMON_STORAGE_DIRECTORY_KEY: &str = "DAEMON_STORAGE_DIRECTORY";

/// Path to the cluster settings file shared with the worker.
pub const CLUSTER_SETTINGS_PATH_KEY: &str = "CLUSTER_SETTINGS_PATH";

/// Override for the temp directory used by executed commands. Only written
/// when an override is configured.
pub const EXEC_TEMPDIR_KEY: &str = "EXEC_TEMPDIR";

// ============================================================================
// Generated artifacts
// ============================================================================

/// Name of the environment side-channel file written into the workdir.
pub const ENVIRONMENT_FILE_NAME: &str = "environment.json";

/// Extension of the rendered service-registration script.
pub const CONFIG_SCRIPT_EXTENSION: &str = "conf.ps1";

/// Template id of the embedded service-registration script.
pub const SERVICE_TEMPLATE_ID: &str = "win/service.conf";

/// Directory name, under the service user's profile, holding daemon storage.
pub const STORAGE_DIR_NAME: &str = ".svcman";

// ============================================================================
// Service-control commands and exit codes
// ============================================================================

/// Prefix recognized in extra-env files; only `set NAME=value` lines with a
/// single space after the prefix are merged, everything else is skipped.
pub const EXTRA_ENV_LINE_PREFIX: &str = "set ";

/// Exit code the service manager returns when starting a service that is
/// already running (ERROR_SERVICE_ALREADY_RUNNING). Treated as success.
pub const SERVICE_ALREADY_RUNNING_EXIT: i32 = 1056;

/// Status strings classified as "running" for reporting purposes. A pending
/// stop has not completed yet, so it still counts as running.
pub const RUNNING_STATES: [&str; 2] = ["SERVICE_RUNNING", "SERVICE_STOP_PENDING"];

/// Start command for a named service.
pub fn start_command(name: &str) -> String {
    format!("sc start {name}")
}

/// Stop command for a named service.
pub fn stop_command(name: &str) -> String {
    format!("sc stop {name}")
}

/// Status query command for a named service.
pub fn status_command(name: &str) -> String {
    format!("sc status {name}")
}

/// Command disabling future automatic starts of a named service.
pub fn disable_command(name: &str) -> String {
    format!("sc config {name} start= disabled")
}

/// Removal command for a named service.
pub fn delete_command(name: &str) -> String {
    format!("sc delete {name}")
}
