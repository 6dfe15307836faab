//! Error handling for svcman.
use std::path::PathBuf;

use thiserror::Error;

/// Defines all possible errors that can occur while managing a service daemon.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// An operation that requires a registered configuration was invoked before
    /// `create_config` completed (the config script is missing from the workdir).
    #[error("Service '{service}' is not configured (no configuration script on disk)")]
    NotConfigured {
        /// The service that has no configuration script.
        service: String,
    },

    /// Refusal to delete a service that is currently reported as running.
    #[error("Service '{service}' is still running; stop it first or pass --force")]
    StillRunning {
        /// The service that is still active.
        service: String,
    },

    /// Error executing an OS-facing service-control command.
    #[error("Command execution failed: {0}")]
    Command(#[from] CommandError),

    /// Error rendering the service registration script.
    #[error("Template rendering failed: {0}")]
    Render(#[from] RenderError),

    /// Error writing a generated artifact to the workdir.
    #[error("Failed to write '{path}': {source}")]
    ArtifactWrite {
        /// Path of the artifact that could not be written.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error serializing the environment mapping to JSON.
    #[error("Failed to serialize environment mapping: {0}")]
    EnvSerialize(#[from] serde_json::Error),

    /// Error removing the configuration script during deletion.
    #[error("Failed to remove configuration script '{path}': {source}")]
    ConfigRemove {
        /// Path of the script that could not be removed.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },
}

/// Error type for daemon configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading or accessing the configuration file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing YAML configuration.
    #[error("Invalid YAML format: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Error type for external command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not be spawned at all.
    #[error("Failed to spawn command `{command}`: {source}")]
    Spawn {
        /// The command line that failed to spawn.
        command: String,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited with a non-zero code.
    #[error("Command `{command}` exited with code {code}: {stderr}")]
    NonZeroExit {
        /// The command line that failed.
        command: String,
        /// Exit code reported by the OS.
        code: i32,
        /// Raw captured stdout bytes (encoding is command-specific).
        stdout: Vec<u8>,
        /// Captured stderr, lossily decoded for display.
        stderr: String,
    },
}

impl CommandError {
    /// Exit code carried by this error, if the command ran at all.
    pub fn code(&self) -> Option<i32> {
        match self {
            CommandError::Spawn { .. } => None,
            CommandError::NonZeroExit { code, .. } => Some(*code),
        }
    }
}

/// Error type for template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested template id is not registered.
    #[error("Unknown template '{0}'")]
    TemplateNotFound(String),

    /// Error writing the rendered output to its destination.
    #[error("Failed to write rendered template to '{path}': {source}")]
    WriteError {
        /// Destination path of the rendered output.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },
}
