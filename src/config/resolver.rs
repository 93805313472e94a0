//! Argument Resolver
//!
//! Turns raw command-line arguments, environment variables and the config
//! file into one immutable [`DeploymentConfig`].
//!
//! Precedence per field: CLI flag, then `EBDEPLOY_*` variable, then config
//! file, then built-in default. Region additionally honours `AWS_REGION` and
//! `AWS_DEFAULT_REGION` below `EBDEPLOY_REGION`.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::application::deploy::{
    default_bucket, DeploymentConfig, NetworkSettings, RoleNames, ScalingSettings,
};
use crate::domain::value_objects::{ReadinessPolicy, ResourceTags, VersionLabel};

use super::loader::ConfigError;
use super::types::Config;

/// Raw deploy arguments as parsed from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployArgs {
    pub application: String,
    pub environment: String,
    pub version_label: Option<String>,
    pub region: Option<String>,
    pub artifact: Option<PathBuf>,
    pub instance_type: Option<String>,
    pub vpc_id: Option<String>,
    pub public_subnets: [Option<String>; 2],
    pub private_subnets: [Option<String>; 2],
    pub clean_all: bool,
}

/// Resolution output: the configuration and anything the operator should see
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: DeploymentConfig,
    pub warnings: Vec<String>,
}

const MAX_APPLICATION_LEN: usize = 100;
const ENVIRONMENT_LEN: std::ops::RangeInclusive<usize> = 4..=40;

/// Resolve arguments into a deployment configuration
///
/// `env` looks up an environment variable; empty values count as unset.
pub fn resolve(
    args: DeployArgs,
    file: &Config,
    env: impl Fn(&str) -> Option<String>,
    now: DateTime<Utc>,
) -> Result<Resolved, ConfigError> {
    let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut warnings = Vec::new();

    let application = validate_application(&args.application)?;
    let environment = validate_environment(&args.environment)?;

    let version_label = match args.version_label.as_deref() {
        Some(label) => VersionLabel::parse(label)
            .map_err(|e| ConfigError::invalid("version label", e.to_string()))?,
        None => VersionLabel::timestamped(now),
    };

    let region = non_empty(args.region.clone())
        .or_else(|| lookup("EBDEPLOY_REGION"))
        .or_else(|| lookup("AWS_REGION"))
        .or_else(|| lookup("AWS_DEFAULT_REGION"))
        .or_else(|| non_empty(file.deploy.region.clone()))
        .unwrap_or_else(|| DeploymentConfig::DEFAULT_REGION.to_string());

    let instance_type = non_empty(args.instance_type.clone())
        .or_else(|| lookup("EBDEPLOY_INSTANCE_TYPE"))
        .or_else(|| non_empty(file.deploy.instance_type.clone()))
        .unwrap_or_else(|| DeploymentConfig::DEFAULT_INSTANCE_TYPE.to_string());

    let solution_stack = lookup("EBDEPLOY_SOLUTION_STACK")
        .or_else(|| non_empty(Some(file.deploy.solution_stack.clone())))
        .unwrap_or_else(|| DeploymentConfig::DEFAULT_SOLUTION_STACK.to_string());

    let bucket = lookup("EBDEPLOY_BUCKET")
        .or_else(|| non_empty(file.deploy.bucket.clone()))
        .unwrap_or_else(|| default_bucket(&application, &region));

    let artifact = args
        .artifact
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| file.deploy.artifact.clone());

    let network = resolve_network(&args, file, &application, &mut warnings)?;

    let scaling = ScalingSettings {
        min: file.deploy.min_instances,
        max: file.deploy.max_instances,
    };
    if scaling.max == 0 || scaling.min > scaling.max {
        return Err(ConfigError::invalid(
            "instance counts",
            format!(
                "min_instances ({}) must not exceed max_instances ({}), and max must be at least 1",
                scaling.min, scaling.max
            ),
        ));
    }

    if file.readiness.max_attempts == 0 {
        return Err(ConfigError::invalid(
            "readiness.max_attempts",
            "at least one attempt is required",
        ));
    }
    let readiness = ReadinessPolicy::new(
        Duration::from_secs(file.readiness.interval_secs),
        file.readiness.max_attempts,
    );

    let roles = RoleNames {
        service_role: require("roles.service_role", &file.roles.service_role)?,
        instance_role: require("roles.instance_role", &file.roles.instance_role)?,
        settle_delay: Duration::from_secs(file.roles.settle_delay_secs),
    };

    let config = DeploymentConfig {
        application,
        environment,
        version_label,
        region,
        artifact,
        instance_type,
        solution_stack,
        bucket,
        network,
        roles,
        scaling,
        readiness,
        state_dir: file.deploy.state_dir.clone(),
        clean_all: args.clean_all,
    };

    Ok(Resolved { config, warnings })
}

fn resolve_network(
    args: &DeployArgs,
    file: &Config,
    application: &str,
    warnings: &mut Vec<String>,
) -> Result<NetworkSettings, ConfigError> {
    let public_subnets = subnet_pair("public", &args.public_subnets, warnings)?;
    let private_subnets = subnet_pair("private", &args.private_subnets, warnings)?;

    let subnet_cidrs: [String; 2] = file
        .network
        .public_subnet_cidrs
        .clone()
        .try_into()
        .map_err(|_| {
            ConfigError::invalid(
                "network.public_subnet_cidrs",
                "exactly two CIDR blocks are required",
            )
        })?;

    let prefix =
        non_empty(file.network.tag_prefix.clone()).unwrap_or_else(|| application.to_string());

    Ok(NetworkSettings {
        vpc_id: non_empty(args.vpc_id.clone()),
        public_subnets,
        private_subnets,
        tags: ResourceTags::new(prefix),
        vpc_cidr: require("network.vpc_cidr", &file.network.vpc_cidr)?,
        subnet_cidrs,
    })
}

/// Both ids or nothing; a lone id is ignored with a warning
fn subnet_pair(
    kind: &str,
    pair: &[Option<String>; 2],
    warnings: &mut Vec<String>,
) -> Result<Option<[String; 2]>, ConfigError> {
    let first = non_empty(pair[0].clone());
    let second = non_empty(pair[1].clone());
    match (first, second) {
        (Some(a), Some(b)) => {
            if a == b {
                return Err(ConfigError::invalid(
                    "subnets",
                    format!("{} subnets must be two different subnets, got {} twice", kind, a),
                ));
            }
            Ok(Some([a, b]))
        }
        (Some(one), None) | (None, Some(one)) => {
            warnings.push(format!(
                "only one {} subnet supplied ({}); ignoring it, both are required",
                kind, one
            ));
            Ok(None)
        }
        (None, None) => Ok(None),
    }
}

fn validate_application(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::invalid("application name", "must not be empty"));
    }
    if name.chars().count() > MAX_APPLICATION_LEN {
        return Err(ConfigError::invalid(
            "application name",
            format!("must be at most {} characters", MAX_APPLICATION_LEN),
        ));
    }
    Ok(name.to_string())
}

fn validate_environment(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if !ENVIRONMENT_LEN.contains(&name.len()) {
        return Err(ConfigError::invalid(
            "environment name",
            format!(
                "'{}' must be {} to {} characters long",
                name,
                ENVIRONMENT_LEN.start(),
                ENVIRONMENT_LEN.end()
            ),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ConfigError::invalid(
            "environment name",
            format!("'{}' may contain only letters, digits and hyphens", name),
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(ConfigError::invalid(
            "environment name",
            format!("'{}' must not start or end with a hyphen", name),
        ));
    }
    Ok(name.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(field: &'static str, value: &str) -> Result<String, ConfigError> {
    non_empty(Some(value.to_string()))
        .ok_or_else(|| ConfigError::invalid(field, "must not be empty"))
}
