//! External command execution for svcman.
use std::process::Command;

use tracing::debug;

use crate::error::CommandError;

/// Captured result of a completed external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code reported by the OS.
    pub exit_code: i32,
    /// Raw stdout bytes; the service manager emits these in a
    /// command-specific encoding, so no decoding happens here.
    pub stdout: Vec<u8>,
    /// Raw stderr bytes.
    pub stderr: Vec<u8>,
}

/// Contract for issuing OS-facing commands.
///
/// Implementations run the command to completion, returning the captured
/// output on exit code zero and a [`CommandError::NonZeroExit`] carrying the
/// exit code and output otherwise.
pub trait CommandRunner: Send + Sync {
    /// Runs a single command line to completion.
    fn run(&self, command: &str) -> Result<CommandOutput, CommandError>;
}

/// Command runner backed by the platform shell.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Creates a new shell-backed runner.
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("cmd.exe");
        cmd.arg("/C").arg(command);
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput, CommandError> {
        debug!("Executing command: `{command}`");

        let output = Self::shell_command(command).output().map_err(|source| {
            CommandError::Spawn {
                command: command.to_string(),
                source,
            }
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!("Command `{command}` exited with code {exit_code}");

        if output.status.success() {
            Ok(CommandOutput {
                exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        } else {
            Err(CommandError::NonZeroExit {
                command: command.to_string(),
                code: exit_code,
                stdout: output.stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
