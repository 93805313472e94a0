//! Option Settings
//!
//! Declarative `(namespace, option, value)` triples applied to an environment
//! at create or update time. Built through `OptionSettingsBuilder`, which
//! rejects empty parts and duplicate keys; serialized only by the provider
//! adapter.

use serde::Serialize;
use thiserror::Error;

use super::NetworkTopology;

/// Option namespaces used by ebdeploy
pub mod namespaces {
    pub const LAUNCH_CONFIGURATION: &str = "aws:autoscaling:launchconfiguration";
    pub const AUTOSCALING_GROUP: &str = "aws:autoscaling:asg";
    pub const INSTANCES: &str = "aws:ec2:instances";
    pub const ENVIRONMENT: &str = "aws:elasticbeanstalk:environment";
    pub const HEALTH_REPORTING: &str = "aws:elasticbeanstalk:healthreporting:system";
    /// Network binding; immutable once the environment exists
    pub const VPC: &str = "aws:ec2:vpc";
}

/// A single configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OptionSetting {
    pub namespace: String,
    pub option_name: String,
    pub value: String,
}

/// Validation failure while building option settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionSettingError {
    #[error("option setting has an empty {part} ({namespace}:{option_name})")]
    Empty {
        part: &'static str,
        namespace: String,
        option_name: String,
    },

    #[error("option setting {namespace}:{option_name} is set twice")]
    Duplicate {
        namespace: String,
        option_name: String,
    },
}

/// Validated, ordered list of option settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct OptionSettings(Vec<OptionSetting>);

impl OptionSettings {
    pub fn iter(&self) -> impl Iterator<Item = &OptionSetting> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, namespace: &str, option_name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.namespace == namespace && s.option_name == option_name)
            .map(|s| s.value.as_str())
    }

    pub fn contains(&self, namespace: &str, option_name: &str) -> bool {
        self.get(namespace, option_name).is_some()
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.0.iter().any(|s| s.namespace == namespace)
    }

    /// Whether any network binding field is present
    pub fn has_network_settings(&self) -> bool {
        self.has_namespace(namespaces::VPC)
    }
}

/// Typed builder for `OptionSettings`
#[derive(Debug, Clone, Default)]
pub struct OptionSettingsBuilder {
    entries: Vec<OptionSetting>,
}

impl OptionSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw entry
    pub fn set(
        mut self,
        namespace: impl Into<String>,
        option_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entries.push(OptionSetting {
            namespace: namespace.into(),
            option_name: option_name.into(),
            value: value.into(),
        });
        self
    }

    pub fn instance_profile(self, profile: &str) -> Self {
        self.set(
            namespaces::LAUNCH_CONFIGURATION,
            "IamInstanceProfile",
            profile,
        )
    }

    pub fn instance_type(self, instance_type: &str) -> Self {
        self.set(namespaces::INSTANCES, "InstanceTypes", instance_type)
    }

    pub fn service_role(self, role: &str) -> Self {
        self.set(namespaces::ENVIRONMENT, "ServiceRole", role)
    }

    pub fn load_balanced(self) -> Self {
        self.set(namespaces::ENVIRONMENT, "EnvironmentType", "LoadBalanced")
    }

    pub fn enhanced_health(self) -> Self {
        self.set(namespaces::HEALTH_REPORTING, "SystemType", "enhanced")
    }

    pub fn scaling(self, min: u32, max: u32) -> Self {
        self.set(namespaces::AUTOSCALING_GROUP, "MinSize", min.to_string())
            .set(namespaces::AUTOSCALING_GROUP, "MaxSize", max.to_string())
    }

    /// Creation-only settings: network binding and load balancer type
    pub fn network(self, topology: &NetworkTopology) -> Self {
        let public = topology.public_subnet_ids().join(",");
        let instances = topology.instance_subnet_ids().join(",");
        self.set(namespaces::ENVIRONMENT, "LoadBalancerType", "application")
            .set(namespaces::VPC, "VPCId", topology.vpc_id.as_str())
            .set(namespaces::VPC, "Subnets", instances)
            .set(namespaces::VPC, "ELBSubnets", public)
            .set(namespaces::VPC, "ELBScheme", "public")
            .set(
                namespaces::VPC,
                "AssociatePublicIpAddress",
                topology.instances_public().to_string(),
            )
    }

    /// Validate and freeze the entries, preserving insertion order
    pub fn build(self) -> Result<OptionSettings, OptionSettingError> {
        for (i, entry) in self.entries.iter().enumerate() {
            let empty_part = if entry.namespace.trim().is_empty() {
                Some("namespace")
            } else if entry.option_name.trim().is_empty() {
                Some("option name")
            } else if entry.value.trim().is_empty() {
                Some("value")
            } else {
                None
            };
            if let Some(part) = empty_part {
                return Err(OptionSettingError::Empty {
                    part,
                    namespace: entry.namespace.clone(),
                    option_name: entry.option_name.clone(),
                });
            }

            let duplicate = self.entries[..i].iter().any(|earlier| {
                earlier.namespace == entry.namespace && earlier.option_name == entry.option_name
            });
            if duplicate {
                return Err(OptionSettingError::Duplicate {
                    namespace: entry.namespace.clone(),
                    option_name: entry.option_name.clone(),
                });
            }
        }
        Ok(OptionSettings(self.entries))
    }
}
