//! Error types for ebdeploy
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow` at the edge.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::entities::{EnvironmentEvent, OptionSettingError};
use crate::domain::ports::ProviderError;

/// Result type alias for deploy operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for a deployment run
///
/// Every variant is fatal: the run stops, local transient files are cleaned up
/// and the process exits non-zero.
#[derive(Error, Debug)]
pub enum DeployError {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Deployment artifact does not exist
    #[error("artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// Deployment artifact is a directory or special file
    #[error("artifact is not a regular file: {path}")]
    ArtifactNotFile { path: PathBuf },

    /// Deployment artifact has zero bytes
    #[error("artifact is empty: {path}")]
    ArtifactEmpty { path: PathBuf },

    /// Deployment artifact could not be read
    #[error("failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target region cannot host two public subnets in distinct zones
    #[error("region {region} reports {available} available zone(s); at least 2 are required")]
    InsufficientZones { region: String, available: usize },

    /// The option-settings payload failed validation
    #[error(transparent)]
    OptionSettings(#[from] OptionSettingError),

    /// A provider control-plane call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The environment reached a failed or unhealthy terminal state
    #[error("environment '{environment}' failed (status: {status}, health: {health})")]
    EnvironmentFailed {
        environment: String,
        status: String,
        health: String,
        events: Vec<EnvironmentEvent>,
    },

    /// The environment did not become ready within the polling budget
    #[error(
        "timed out waiting for environment '{environment}' after {attempts} polls ({waited_secs}s)"
    )]
    ReadinessTimeout {
        environment: String,
        attempts: u32,
        waited_secs: u64,
    },
}

impl DeployError {
    /// Recent provider events attached to the error, if any
    pub fn events(&self) -> &[EnvironmentEvent] {
        match self {
            DeployError::EnvironmentFailed { events, .. } => events,
            _ => &[],
        }
    }
}
