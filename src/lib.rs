//! Svcman manages the lifecycle of background worker daemons registered as
//! native Windows services. It materializes the service configuration
//! (environment file plus registration script) from a daemon identity, then
//! drives install, start, stop, status, and delete through the OS service
//! manager while keeping an idempotent view of what is installed and running.

/// Capability trait for service-management backends.
pub mod backend;

/// CLI interface.
pub mod cli;

/// Daemon identity and installation configuration.
pub mod config;

/// Environment-variable contract, command strings, and exit codes.
pub mod constants;

/// Environment-variable materialization.
pub mod envvars;

/// Error handling.
pub mod error;

/// External command execution.
pub mod runner;

/// Windows service-manager backend.
pub mod service;

/// Status output transcoding and classification.
pub mod status;

/// Registration-script template rendering.
pub mod template;
