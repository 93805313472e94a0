//! Domain Value Objects
//!
//! Immutable value types shared by the provisioning steps.

mod artifact;
mod readiness_policy;
mod tags;
mod version_label;

pub use artifact::{ArtifactInfo, ArtifactLocation, BucketLocation};
pub use readiness_policy::ReadinessPolicy;
pub use tags::{ResourceTags, MANAGED_BY};
pub use version_label::{VersionLabel, VersionLabelError};
