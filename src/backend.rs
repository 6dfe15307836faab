//! Capability surface shared by all service-management backends.
use crate::error::DaemonError;

/// Outcome of a start request. Starting an already-running service is benign
/// and callers pattern-match on it instead of catching an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The service transitioned to started.
    Started,
    /// The service manager reported the service as already running.
    AlreadyRunning,
}

/// Lifecycle operations every service-management backend provides.
///
/// A generic driver holds a `dyn ServiceBackend` and never a concrete type;
/// one implementation exists per OS service manager.
pub trait ServiceBackend {
    /// Name of the managed service.
    fn name(&self) -> &str;

    /// Materializes the service configuration on disk and registers the
    /// service with the OS manager.
    fn create_config(&self) -> Result<(), DaemonError>;

    /// OS-level start command. Fails if the service is not yet configured.
    fn start_command(&self) -> Result<String, DaemonError>;

    /// OS-level stop command. Stopping an unknown or stopped service is
    /// delegated to the OS manager.
    fn stop_command(&self) -> String;

    /// Starts the service, treating "already running" as success.
    fn start(&self) -> Result<StartOutcome, DaemonError>;

    /// Stops the service.
    fn stop(&self) -> Result<(), DaemonError>;

    /// Whether the OS manager currently reports the service as running.
    /// Advisory: never fails, a failed query means "not running".
    fn status(&self) -> bool;

    /// Hook invoked before an intentional stop; disables automatic restarts
    /// for boot-time startup policies so the OS does not relaunch the service.
    fn before_self_stop(&self) -> Result<(), DaemonError>;

    /// Unregisters the service and removes its configuration artifacts.
    /// Refuses to delete a running service unless `force` is set.
    fn delete(&self, force: bool) -> Result<(), DaemonError>;
}
