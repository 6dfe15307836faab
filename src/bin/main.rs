use std::{error::Error, path::Path, process::ExitCode, sync::Arc};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use svcman::{
    backend::{ServiceBackend, StartOutcome},
    cli::{Cli, Commands, parse_args},
    config::{InstallPaths, load_daemon_config},
    runner::ShellRunner,
    service::WinServiceManager,
    template::EmbeddedRenderer,
};

/// Exit code reported by `status` when the service is not running, following
/// the LSB init-script convention.
const STATUS_NOT_RUNNING_EXIT: u8 = 3;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = parse_args();
    init_logging(&args);

    match args.command {
        Commands::Install { config } => {
            let daemon = build_backend(&config)?;
            daemon.create_config()?;
            info!("Service '{}' installed and configured", daemon.name());
        }
        Commands::Start { config } => {
            let daemon = build_backend(&config)?;
            match daemon.start()? {
                StartOutcome::Started => info!("Service '{}' started", daemon.name()),
                StartOutcome::AlreadyRunning => {
                    warn!("Service '{}' was already running", daemon.name())
                }
            }
        }
        Commands::Stop { config } => {
            let daemon = build_backend(&config)?;
            daemon.before_self_stop()?;
            daemon.stop()?;
            info!("Service '{}' stopped", daemon.name());
        }
        Commands::Status { config } => {
            let daemon = build_backend(&config)?;
            if daemon.status() {
                println!("{}: running", daemon.name());
            } else {
                println!("{}: not running", daemon.name());
                return Ok(ExitCode::from(STATUS_NOT_RUNNING_EXIT));
            }
        }
        Commands::Disable { config } => {
            let daemon = build_backend(&config)?;
            daemon.before_self_stop()?;
            info!("Automatic start disabled for '{}'", daemon.name());
        }
        Commands::Delete { config, force } => {
            let daemon = build_backend(&config)?;
            daemon.delete(force)?;
            info!("Service '{}' deleted", daemon.name());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Builds the service backend for the daemon described by the config file.
fn build_backend(config_path: &Path) -> Result<Box<dyn ServiceBackend>, Box<dyn Error>> {
    let config = load_daemon_config(config_path)?;
    let paths = InstallPaths {
        install_dir: install_dir(),
    };

    Ok(Box::new(WinServiceManager::new(
        config,
        paths,
        Arc::new(ShellRunner::new()),
        Arc::new(EmbeddedRenderer::new()),
    )))
}

/// Resolves the daemon runtime installation directory: the directory holding
/// the current executable, overridable through SVCMAN_INSTALL_DIR.
fn install_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("SVCMAN_INSTALL_DIR") {
        return std::path::PathBuf::from(dir);
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

/// Initializes logging, honoring a `--log-level` override before `RUST_LOG`.
fn init_logging(args: &Cli) {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
