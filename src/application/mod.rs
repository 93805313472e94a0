//! Application Layer
//!
//! The provisioning steps and the use case that runs them in order.
//! This layer:
//! - Depends on the Domain layer (entities, value objects, ports)
//! - Talks to the provider only through ports
//! - Never spawns processes or reads configuration files
//!
//! ## Steps
//!
//! - `ArtifactValidator` - Checks the local bundle and digests it
//! - `RoleProvisioner` - Service role, instance role and instance profile
//! - `StorageProvisioner` - Artifact bucket and upload
//! - `VersionRegistrar` - Application and application version
//! - `NetworkProvisioner` - VPC, public subnets, gateway and routing
//! - `EnvironmentReconciler` - Create or update the environment
//! - `ReadinessWaiter` - Bounded polling until healthy
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Runs every step for one deployment

pub mod artifact;
pub mod deploy;
pub mod network;
pub mod readiness;
pub mod reconcile;
pub mod roles;
pub mod storage;
pub mod version;

#[cfg(test)]
pub(crate) mod fake;

pub use artifact::ArtifactValidator;
pub use deploy::{
    default_bucket, DeployReport, DeployUseCase, DeploymentConfig, NetworkSettings,
    ReconcileAction, RoleNames, ScalingSettings,
};
pub use network::NetworkProvisioner;
pub use readiness::{classify, ReadinessState, ReadinessWaiter, Verdict};
pub use reconcile::EnvironmentReconciler;
pub use roles::RoleProvisioner;
pub use storage::StorageProvisioner;
pub use version::VersionRegistrar;
