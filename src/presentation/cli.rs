//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - A single command: every flag describes the one deployment to run
//! - Output flags (--json, --color, --verbose) only change rendering

use std::path::PathBuf;

use clap::Parser;

use crate::config::DeployArgs;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// ebdeploy - idempotent deployment to a managed application environment
#[derive(Parser, Debug)]
#[command(name = "ebdeploy")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Missing roles, bucket, application and network are created; existing ones are reused."
)]
pub struct Cli {
    /// Application name
    #[arg(short = 'a', long = "app", value_name = "NAME")]
    pub app: String,

    /// Environment name (4-40 characters, letters, digits and hyphens)
    #[arg(short = 'e', long = "env", value_name = "NAME")]
    pub env: String,

    /// Application version label (default: v<UTC timestamp>)
    #[arg(long = "version-label", value_name = "LABEL")]
    pub version_label: Option<String>,

    /// Provider region
    #[arg(short = 'r', long, value_name = "REGION")]
    pub region: Option<String>,

    /// Deployment artifact (zip bundle)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Instance type
    #[arg(long = "instance-type", value_name = "TYPE")]
    pub instance_type: Option<String>,

    /// Existing VPC to deploy into
    #[arg(long = "vpc-id", value_name = "ID")]
    pub vpc_id: Option<String>,

    /// First existing public subnet
    #[arg(long = "public-subnet-1", value_name = "ID")]
    pub public_subnet_1: Option<String>,

    /// Second existing public subnet
    #[arg(long = "public-subnet-2", value_name = "ID")]
    pub public_subnet_2: Option<String>,

    /// First existing private (instance) subnet
    #[arg(long = "private-subnet-1", value_name = "ID")]
    pub private_subnet_1: Option<String>,

    /// Second existing private (instance) subnet
    #[arg(long = "private-subnet-2", value_name = "ID")]
    pub private_subnet_2: Option<String>,

    /// Also remove the generated option-settings document at exit
    #[arg(long)]
    pub clean_all: bool,

    /// Configuration file (default: ./ebdeploy.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows every resource checked)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Deployment arguments for the resolver
    pub fn deploy_args(&self) -> DeployArgs {
        DeployArgs {
            application: self.app.clone(),
            environment: self.env.clone(),
            version_label: self.version_label.clone(),
            region: self.region.clone(),
            artifact: self.artifact.clone(),
            instance_type: self.instance_type.clone(),
            vpc_id: self.vpc_id.clone(),
            public_subnets: [self.public_subnet_1.clone(), self.public_subnet_2.clone()],
            private_subnets: [self.private_subnet_1.clone(), self.private_subnet_2.clone()],
            clean_all: self.clean_all,
        }
    }
}
