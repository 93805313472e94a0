//! Deploy Report
//!
//! What a successful run did.

use crate::domain::entities::NetworkTopology;
use crate::domain::value_objects::{ArtifactInfo, ArtifactLocation, VersionLabel};

/// Whether the environment was created or updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    Created,
    Updated,
}

impl ReconcileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// Result of a successful deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub application: String,
    pub environment: String,
    pub version_label: VersionLabel,
    pub artifact: ArtifactInfo,
    pub location: ArtifactLocation,
    pub topology: NetworkTopology,
    pub action: ReconcileAction,
    /// Readiness polls until healthy
    pub attempts: u32,
    /// Resources created during the run
    pub created: usize,
    pub warnings: Vec<String>,
}
