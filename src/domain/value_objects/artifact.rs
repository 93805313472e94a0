//! Artifact values: the validated local bundle and where it lives remotely.

use std::fmt;
use std::path::{Path, PathBuf};

use super::VersionLabel;

/// A validated local deployment artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub size: u64,
    /// `sha256:<hex>` digest of the bundle
    pub digest: String,
}

impl ArtifactInfo {
    /// File extension used for the object key (`zip` when the file has none)
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "zip".to_string())
}

/// Bucket + key of an uploaded artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub bucket: String,
    pub key: String,
}

impl ArtifactLocation {
    /// Deterministic location: `<bucket>/<application>/<version>.<ext>`
    pub fn for_version(
        bucket: &str,
        application: &str,
        version: &VersionLabel,
        artifact: &ArtifactInfo,
    ) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: format!("{}/{}.{}", application, version, artifact.extension()),
        }
    }

    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

/// Where a new bucket is created
///
/// The provider rejects an explicit location constraint for its default
/// region, and requires one everywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketLocation {
    DefaultRegion,
    Constraint(String),
}

impl BucketLocation {
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    pub fn for_region(region: &str) -> Self {
        if region == Self::DEFAULT_REGION {
            Self::DefaultRegion
        } else {
            Self::Constraint(region.to_string())
        }
    }
}
