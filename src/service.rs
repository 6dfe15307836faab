//! Windows service-manager backend.
//!
//! Translates lifecycle operations on a single named service into `sc`
//! invocations and interprets their results. No lifecycle state is held in
//! memory: "configured" is re-derived from the presence of the registration
//! script on disk, "running" from a status query, on every call.

use std::{collections::BTreeMap, fs, path::PathBuf, sync::Arc};

use tracing::{debug, error, info};

use crate::backend::{ServiceBackend, StartOutcome};
use crate::config::{DaemonConfig, InstallPaths};
use crate::constants::{self, SERVICE_ALREADY_RUNNING_EXIT, SERVICE_TEMPLATE_ID};
use crate::envvars;
use crate::error::DaemonError;
use crate::runner::CommandRunner;
use crate::status::{decode_status_output, is_running_state};
use crate::template::TemplateRenderer;

/// Manages one daemon registered as a native Windows service.
pub struct WinServiceManager {
    config: DaemonConfig,
    paths: InstallPaths,
    config_path: PathBuf,
    runner: Arc<dyn CommandRunner>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl WinServiceManager {
    /// Creates a manager for the given daemon identity.
    pub fn new(
        config: DaemonConfig,
        paths: InstallPaths,
        runner: Arc<dyn CommandRunner>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        let config_path = config.config_path();
        Self {
            config,
            paths,
            config_path,
            runner,
            renderer,
        }
    }

    /// Variables handed to the registration-script template.
    fn template_vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert(
            "vars_file".to_string(),
            self.config.environment_file_path().to_string_lossy().into_owned(),
        );
        vars.insert("queue".to_string(), self.config.queue.clone());
        vars.insert(
            "service_user".to_string(),
            self.config.service_user.clone(),
        );
        vars.insert(
            "service_password".to_string(),
            self.config.service_password.clone(),
        );
        vars.insert(
            "max_workers".to_string(),
            self.config.max_workers.to_string(),
        );
        vars.insert(
            "install_dir".to_string(),
            self.paths.install_dir.to_string_lossy().into_owned(),
        );
        vars.insert("name".to_string(), self.config.name.clone());
        vars.insert(
            "startup_policy".to_string(),
            self.config.startup_policy.as_ref().to_string(),
        );
        vars.insert(
            "failure_reset_timeout".to_string(),
            self.config.failure_reset_timeout.to_string(),
        );
        vars.insert(
            "failure_restart_delay".to_string(),
            self.config.failure_restart_delay.to_string(),
        );
        vars
    }
}

impl ServiceBackend for WinServiceManager {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn create_config(&self) -> Result<(), DaemonError> {
        let env = envvars::build_environment(&self.config);
        envvars::write_environment_file(&self.config, &env)?;

        info!(
            "Rendering configuration script '{}' from template",
            self.config_path.display()
        );
        self.renderer
            .render(SERVICE_TEMPLATE_ID, &self.config_path, &self.template_vars())?;
        info!(
            "Rendered configuration script: {}",
            self.config_path.display()
        );

        info!("Running configuration script");
        let script = self.config_path.to_string_lossy().into_owned();
        if let Err(err) = self.runner.run(&script) {
            // Surface the full failure before propagating it unchanged.
            error!("Failure encountered while running configuration script: {err}");
            return Err(err.into());
        }
        info!("Successfully executed configuration script");
        Ok(())
    }

    fn start_command(&self) -> Result<String, DaemonError> {
        if !self.config_path.is_file() {
            return Err(DaemonError::NotConfigured {
                service: self.config.name.clone(),
            });
        }
        Ok(constants::start_command(&self.config.name))
    }

    fn stop_command(&self) -> String {
        constants::stop_command(&self.config.name)
    }

    fn start(&self) -> Result<StartOutcome, DaemonError> {
        let command = self.start_command()?;
        info!("Starting service: {}", self.config.name);

        match self.runner.run(&command) {
            Ok(_) => Ok(StartOutcome::Started),
            Err(err) if err.code() == Some(SERVICE_ALREADY_RUNNING_EXIT) => {
                info!("Service '{}' already started", self.config.name);
                Ok(StartOutcome::AlreadyRunning)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn stop(&self) -> Result<(), DaemonError> {
        info!("Stopping service: {}", self.config.name);
        self.runner.run(&self.stop_command())?;
        Ok(())
    }

    fn status(&self) -> bool {
        let command = constants::status_command(&self.config.name);
        match self.runner.run(&command) {
            Ok(response) => {
                // The service manager emits status text in UTF-16; transcode
                // before comparing against the running-class states.
                let state = decode_status_output(&response.stdout);
                info!("{state}");
                is_running_state(&state)
            }
            Err(err) => {
                debug!("{err}");
                false
            }
        }
    }

    fn before_self_stop(&self) -> Result<(), DaemonError> {
        if self.config.startup_policy.starts_at_boot() {
            debug!("Disabling service: {}", self.config.name);
            self.runner
                .run(&constants::disable_command(&self.config.name))?;
        }
        Ok(())
    }

    fn delete(&self, force: bool) -> Result<(), DaemonError> {
        if self.status() {
            if !force {
                return Err(DaemonError::StillRunning {
                    service: self.config.name.clone(),
                });
            }
            self.stop()?;
        }

        info!("Removing {} service", self.config.name);
        self.runner
            .run(&constants::delete_command(&self.config.name))?;

        debug!("Deleting {}", self.config_path.display());
        if self.config_path.exists() {
            fs::remove_file(&self.config_path).map_err(|source| {
                DaemonError::ConfigRemove {
                    path: self.config_path.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}
