//! Deployment Configuration
//!
//! The immutable, fully resolved input of a deploy run. Built once by the
//! argument resolver and passed by reference to every step.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::{ReadinessPolicy, ResourceTags, VersionLabel};

/// Resolved deployment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub application: String,
    pub environment: String,
    pub version_label: VersionLabel,
    pub region: String,
    /// Local artifact (zip bundle)
    pub artifact: PathBuf,
    pub instance_type: String,
    pub solution_stack: String,
    /// Artifact bucket, `<app>-deployments-<region>` unless configured
    pub bucket: String,
    pub network: NetworkSettings,
    pub roles: RoleNames,
    pub scaling: ScalingSettings,
    pub readiness: ReadinessPolicy,
    /// Directory holding generated provider documents
    pub state_dir: PathBuf,
    /// Also remove the option-settings document at exit
    pub clean_all: bool,
}

/// Caller-supplied network identifiers plus the layout used when creating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    pub vpc_id: Option<String>,
    /// Both public subnets, or nothing
    pub public_subnets: Option<[String; 2]>,
    /// Both private (instance) subnets, or nothing
    pub private_subnets: Option<[String; 2]>,
    pub tags: ResourceTags,
    pub vpc_cidr: String,
    pub subnet_cidrs: [String; 2],
}

impl NetworkSettings {
    pub const DEFAULT_VPC_CIDR: &'static str = "10.0.0.0/16";
    pub const DEFAULT_SUBNET_CIDRS: [&'static str; 2] = ["10.0.1.0/24", "10.0.2.0/24"];

    /// Nothing supplied: resolve or create everything under `prefix` tags
    pub fn managed(prefix: impl Into<String>) -> Self {
        Self {
            vpc_id: None,
            public_subnets: None,
            private_subnets: None,
            tags: ResourceTags::new(prefix),
            vpc_cidr: Self::DEFAULT_VPC_CIDR.to_string(),
            subnet_cidrs: Self::DEFAULT_SUBNET_CIDRS.map(String::from),
        }
    }
}

/// Role and instance-profile names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleNames {
    pub service_role: String,
    /// Also the instance profile name
    pub instance_role: String,
    /// Pause after binding the instance role to its profile
    pub settle_delay: Duration,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            service_role: "aws-elasticbeanstalk-service-role".to_string(),
            instance_role: "aws-elasticbeanstalk-ec2-role".to_string(),
            settle_delay: Duration::from_secs(10),
        }
    }
}

/// Autoscaling group bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingSettings {
    pub min: u32,
    pub max: u32,
}

impl Default for ScalingSettings {
    fn default() -> Self {
        Self { min: 1, max: 2 }
    }
}

impl DeploymentConfig {
    pub const DEFAULT_REGION: &'static str = "us-east-1";
    pub const DEFAULT_INSTANCE_TYPE: &'static str = "t3.micro";
    pub const DEFAULT_SOLUTION_STACK: &'static str =
        "64bit Amazon Linux 2023 v4.3.0 running Docker";

    /// Minimal configuration with built-in defaults, used by tests and the resolver
    pub fn new(
        application: impl Into<String>,
        environment: impl Into<String>,
        version_label: VersionLabel,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        let application = application.into();
        let region = Self::DEFAULT_REGION.to_string();
        Self {
            bucket: default_bucket(&application, &region),
            network: NetworkSettings::managed(application.clone()),
            application,
            environment: environment.into(),
            version_label,
            region,
            artifact: artifact.into(),
            instance_type: Self::DEFAULT_INSTANCE_TYPE.to_string(),
            solution_stack: Self::DEFAULT_SOLUTION_STACK.to_string(),
            roles: RoleNames::default(),
            scaling: ScalingSettings::default(),
            readiness: ReadinessPolicy::default(),
            state_dir: PathBuf::from(".ebdeploy"),
            clean_all: false,
        }
    }

    /// Path of the generated option-settings document
    pub fn option_settings_path(&self) -> PathBuf {
        self.state_dir.join("option-settings.json")
    }
}

/// Longest bucket name the storage service accepts
const MAX_BUCKET_LEN: usize = 63;

/// Bucket name derived from application and region
///
/// The application part is reduced to `[a-z0-9-]` (runs of other characters
/// become one `-`) and shortened so the whole name stays a valid bucket name.
pub fn default_bucket(application: &str, region: &str) -> String {
    let suffix = format!("-deployments-{}", region);
    let budget = MAX_BUCKET_LEN.saturating_sub(suffix.len()).max(1);

    let mut stem = String::with_capacity(application.len());
    for c in application.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('-') {
            stem.push('-');
        }
    }
    stem.truncate(budget);
    let stem = stem.trim_end_matches('-');
    let stem = if stem.is_empty() { "app" } else { stem };

    format!("{}{}", stem, suffix)
}
