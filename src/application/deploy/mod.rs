//! Deploy Module
//!
//! Orchestrates a deployment run.
//!
//! ## Structure
//!
//! - `options` - Resolved run configuration (`DeploymentConfig`)
//! - `result` - Run outcome (`DeployReport`)
//! - `use_case` - Step orchestration (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use ebdeploy::application::deploy::{DeploymentConfig, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(identity, storage, network, environments, clock);
//! let report = use_case.execute_with_events(&config, sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{default_bucket, DeploymentConfig, NetworkSettings, RoleNames, ScalingSettings};
pub use result::{DeployReport, ReconcileAction};
pub use use_case::DeployUseCase;
