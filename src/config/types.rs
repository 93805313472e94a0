//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigError, ConfigWarning};

/// `[deploy]` section: run-wide defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySection {
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub instance_type: Option<String>,

    #[serde(default = "default_solution_stack")]
    pub solution_stack: String,

    /// Artifact bucket; derived from application and region when unset
    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default = "default_artifact")]
    pub artifact: PathBuf,

    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_min_instances")]
    pub min_instances: u32,

    #[serde(default = "default_max_instances")]
    pub max_instances: u32,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            region: None,
            instance_type: None,
            solution_stack: default_solution_stack(),
            bucket: None,
            artifact: default_artifact(),
            state_dir: default_state_dir(),
            min_instances: default_min_instances(),
            max_instances: default_max_instances(),
        }
    }
}

fn default_solution_stack() -> String {
    "64bit Amazon Linux 2023 v4.3.0 running Docker".to_string()
}

fn default_artifact() -> PathBuf {
    PathBuf::from("deploy.zip")
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".ebdeploy")
}

fn default_min_instances() -> u32 {
    1
}

fn default_max_instances() -> u32 {
    2
}

/// `[roles]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesSection {
    #[serde(default = "default_service_role")]
    pub service_role: String,

    /// Instance role; the instance profile shares its name
    #[serde(default = "default_instance_role")]
    pub instance_role: String,

    #[serde(default = "default_settle_delay")]
    pub settle_delay_secs: u64,
}

impl Default for RolesSection {
    fn default() -> Self {
        Self {
            service_role: default_service_role(),
            instance_role: default_instance_role(),
            settle_delay_secs: default_settle_delay(),
        }
    }
}

fn default_service_role() -> String {
    "aws-elasticbeanstalk-service-role".to_string()
}

fn default_instance_role() -> String {
    "aws-elasticbeanstalk-ec2-role".to_string()
}

fn default_settle_delay() -> u64 {
    10
}

/// `[network]` section: layout used when ebdeploy creates the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSection {
    /// Prefix of the `Name` tag; the application name when unset
    #[serde(default)]
    pub tag_prefix: Option<String>,

    #[serde(default = "default_vpc_cidr")]
    pub vpc_cidr: String,

    #[serde(default = "default_subnet_cidrs")]
    pub public_subnet_cidrs: Vec<String>,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            tag_prefix: None,
            vpc_cidr: default_vpc_cidr(),
            public_subnet_cidrs: default_subnet_cidrs(),
        }
    }
}

fn default_vpc_cidr() -> String {
    "10.0.0.0/16".to_string()
}

fn default_subnet_cidrs() -> Vec<String> {
    vec!["10.0.1.0/24".to_string(), "10.0.2.0/24".to_string()]
}

/// `[readiness]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSection {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ReadinessSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_interval() -> u64 {
    20
}

fn default_max_attempts() -> u32 {
    30
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure (`ebdeploy.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub deploy: DeploySection,

    #[serde(default)]
    pub roles: RolesSection,

    #[serde(default)]
    pub network: NetworkSection,

    #[serde(default)]
    pub readiness: ReadinessSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }
}
