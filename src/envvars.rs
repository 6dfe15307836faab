//! Environment-variable materialization for the managed worker.
//!
//! The mapping is rebuilt from scratch on every configure call, written to
//! `<workdir>/environment.json`, and consumed by the worker process at
//! runtime. It is never kept in memory beyond that.

use std::{collections::BTreeMap, fs, path::Path};

use tracing::{debug, info};

use crate::config::DaemonConfig;
use crate::constants::{
    AGENT_LOG_DIR_KEY, AGENT_LOG_LEVEL_KEY, AGENT_LOG_MAX_BYTES_KEY,
    AGENT_LOG_MAX_HISTORY_KEY, AGENT_WORK_DIR_KEY, CLUSTER_SETTINGS_PATH_KEY,
    DAEMON_STORAGE_DIRECTORY_KEY, DAEMON_USER_KEY, EXEC_TEMPDIR_KEY,
    EXTRA_ENV_LINE_PREFIX, LOCAL_REST_CERT_FILE_KEY, MANAGER_FILE_SERVER_URL_KEY,
    REST_HOST_KEY, REST_PORT_KEY,
};
use crate::error::DaemonError;

/// Builds the full environment mapping for a daemon, including any overrides
/// from its extra-env file. Extra entries are applied last and win on key
/// collisions.
pub fn build_environment(config: &DaemonConfig) -> BTreeMap<String, String> {
    let mut env = base_environment(config);

    if let Some(extra_path) = &config.extra_env_path {
        if extra_path.exists() {
            merge_extra_env(&mut env, extra_path);
        } else {
            debug!(
                "Extra env file {} does not exist; skipping merge",
                extra_path.display()
            );
        }
    }

    env
}

/// Builds the built-in portion of the environment mapping from the daemon
/// identity fields.
fn base_environment(config: &DaemonConfig) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    env.insert(REST_HOST_KEY.to_string(), config.rest_host.clone());
    env.insert(REST_PORT_KEY.to_string(), config.rest_port.to_string());
    env.insert(
        LOCAL_REST_CERT_FILE_KEY.to_string(),
        config.local_rest_cert_file.clone(),
    );
    env.insert(
        MANAGER_FILE_SERVER_URL_KEY.to_string(),
        config.file_server_url(),
    );
    env.insert(AGENT_LOG_DIR_KEY.to_string(), config.log_dir.clone());
    env.insert(DAEMON_USER_KEY.to_string(), config.user.clone());
    env.insert(
        AGENT_LOG_LEVEL_KEY.to_string(),
        config.log_level.to_uppercase(),
    );
    env.insert(
        AGENT_WORK_DIR_KEY.to_string(),
        config.workdir.to_string_lossy().into_owned(),
    );
    env.insert(
        AGENT_LOG_MAX_BYTES_KEY.to_string(),
        config.log_max_bytes.to_string(),
    );
    env.insert(
        AGENT_LOG_MAX_HISTORY_KEY.to_string(),
        config.log_max_history.to_string(),
    );
    env.insert(
        DAEMON_STORAGE_DIRECTORY_KEY.to_string(),
        config.storage_directory(),
    );
    env.insert(
        CLUSTER_SETTINGS_PATH_KEY.to_string(),
        config.cluster_settings_path.clone(),
    );

    if let Some(temp_path) = &config.executable_temp_path {
        env.insert(EXEC_TEMPDIR_KEY.to_string(), temp_path.clone());
    }

    env
}

/// Merges `set NAME=value` lines from an extra-env file into the mapping,
/// overriding built-in entries of the same name.
///
/// Only lines with the literal `set ` prefix and exactly one space before the
/// assignment are recognized; malformed lines are skipped without reporting.
fn merge_extra_env(env: &mut BTreeMap<String, String>, path: &Path) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!("Failed to read extra env file {}: {err}", path.display());
            return;
        }
    };

    for line in content.lines() {
        let Some(rest) = line.strip_prefix(EXTRA_ENV_LINE_PREFIX) else {
            continue;
        };
        let Some(assignment) = rest.split(' ').next() else {
            continue;
        };
        if let Some((key, value)) = assignment.split_once('=') {
            if key.is_empty() {
                continue;
            }
            env.insert(key.to_string(), value.to_string());
        }
    }
}

/// Serializes the environment mapping to the daemon's environment file as
/// indented JSON. The rendered registration script points the service at this
/// path, so writing it is a required side effect of configuration.
pub fn write_environment_file(
    config: &DaemonConfig,
    env: &BTreeMap<String, String>,
) -> Result<(), DaemonError> {
    let path = config.environment_file_path();
    info!("Rendering environment variables JSON to {}", path.display());

    let serialized = serde_json::to_string_pretty(env)?;
    fs::write(&path, serialized).map_err(|source| DaemonError::ArtifactWrite {
        path,
        source,
    })
}
