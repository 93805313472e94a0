//! ebdeploy - idempotent deployment orchestrator
//!
//! Deploys a local artifact to a managed application environment: ensures
//! IAM roles, the artifact bucket, the application version and a public
//! network exist, creates or updates the environment, then waits until it
//! reports healthy.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployReport, DeployUseCase, DeploymentConfig};
pub use config::{Config, DeployArgs};
pub use error::{DeployError, DeployResult};
