//! Elastic Beanstalk adapter
//!
//! Option settings are written to the state directory as a JSON document and
//! passed by `file://` reference; the document is the one persisted artifact
//! of a run.

use std::path::PathBuf;

use serde::Deserialize;

use super::cli::AwsCli;
use crate::domain::entities::{
    namespaces, EnvironmentEvent, EnvironmentHealth, EnvironmentStatus, OptionSettings,
};
use crate::domain::ports::{
    CreateEnvironment, EnvironmentService, ProviderError, ProviderResult, UpdateEnvironment,
};
use crate::domain::value_objects::{ArtifactLocation, VersionLabel};
use crate::infrastructure::fs::ScratchFiles;

const SERVICE: &str = "elasticbeanstalk";

/// Environment port over `aws elasticbeanstalk`
pub struct BeanstalkCli {
    cli: AwsCli,
    scratch: ScratchFiles,
    option_settings_path: PathBuf,
}

impl BeanstalkCli {
    pub fn new(cli: AwsCli, scratch: ScratchFiles, option_settings_path: impl Into<PathBuf>) -> Self {
        Self {
            cli,
            scratch,
            option_settings_path: option_settings_path.into(),
        }
    }

    fn describe(&self, application: &str, environment: &str) -> ProviderResult<Option<Environment>> {
        let response: DescribeEnvironments = self.cli.json(
            SERVICE,
            "describe-environments",
            &[
                "--application-name",
                application,
                "--environment-names",
                environment,
                "--no-include-deleted",
            ],
        )?;
        Ok(response.environments.into_iter().next())
    }

    /// Write the option-settings document and return its `file://` argument
    fn option_settings_arg(&self, operation: &str, options: &OptionSettings) -> ProviderResult<String> {
        let local_io = |message: String| ProviderError::LocalIo {
            operation: format!("{} {}", SERVICE, operation),
            message,
        };
        let document = serde_json::to_vec_pretty(options).map_err(|e| local_io(e.to_string()))?;
        self.scratch
            .write_generated(&self.option_settings_path, &document)
            .map_err(|e| local_io(e.to_string()))?;
        Ok(format!("file://{}", self.option_settings_path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeApplications {
    #[serde(default)]
    applications: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeEnvironments {
    #[serde(default)]
    environments: Vec<Environment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Environment {
    status: String,
    health: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeConfigurationSettings {
    #[serde(default)]
    configuration_settings: Vec<ConfigurationSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigurationSettings {
    #[serde(default)]
    option_settings: Vec<ConfiguredOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConfiguredOption {
    namespace: String,
    option_name: String,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeEvents {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Event {
    #[serde(default)]
    event_date: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    message: String,
}

impl From<Event> for EnvironmentEvent {
    fn from(e: Event) -> Self {
        Self {
            timestamp: e.event_date,
            severity: e.severity,
            message: e.message,
        }
    }
}

fn bound_vpc(response: DescribeConfigurationSettings) -> Option<String> {
    response
        .configuration_settings
        .into_iter()
        .flat_map(|c| c.option_settings)
        .find(|o| o.namespace == namespaces::VPC && o.option_name == "VPCId")
        .and_then(|o| o.value)
        .filter(|v| !v.is_empty())
}

fn source_bundle(location: &ArtifactLocation) -> String {
    serde_json::json!({ "S3Bucket": location.bucket, "S3Key": location.key }).to_string()
}

impl EnvironmentService for BeanstalkCli {
    fn application_exists(&self, application: &str) -> ProviderResult<bool> {
        let response: DescribeApplications = self.cli.json(
            SERVICE,
            "describe-applications",
            &["--application-names", application],
        )?;
        Ok(!response.applications.is_empty())
    }

    fn create_application(&self, application: &str) -> ProviderResult<()> {
        self.cli.exec(
            SERVICE,
            "create-application",
            &["--application-name", application],
        )
    }

    fn create_application_version(
        &self,
        application: &str,
        version_label: &VersionLabel,
        source: &ArtifactLocation,
        description: &str,
    ) -> ProviderResult<()> {
        let bundle = source_bundle(source);
        self.cli.exec(
            SERVICE,
            "create-application-version",
            &[
                "--application-name",
                application,
                "--version-label",
                version_label.as_str(),
                "--source-bundle",
                bundle.as_str(),
                "--description",
                description,
            ],
        )
    }

    fn environment_status(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<EnvironmentStatus>> {
        Ok(self
            .describe(application, environment)?
            .map(|e| EnvironmentStatus::parse(&e.status)))
    }

    fn environment_health(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<EnvironmentHealth> {
        Ok(self
            .describe(application, environment)?
            .and_then(|e| e.health)
            .map(|h| EnvironmentHealth::parse(&h))
            .unwrap_or(EnvironmentHealth::Grey))
    }

    fn environment_vpc(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<String>> {
        let response: DescribeConfigurationSettings = self.cli.json(
            SERVICE,
            "describe-configuration-settings",
            &[
                "--application-name",
                application,
                "--environment-name",
                environment,
            ],
        )?;
        Ok(bound_vpc(response))
    }

    fn create_environment(&self, request: &CreateEnvironment<'_>) -> ProviderResult<()> {
        let options = self.option_settings_arg("create-environment", request.options)?;
        self.cli.exec(
            SERVICE,
            "create-environment",
            &[
                "--application-name",
                request.application,
                "--environment-name",
                request.environment,
                "--version-label",
                request.version_label.as_str(),
                "--solution-stack-name",
                request.solution_stack,
                "--option-settings",
                options.as_str(),
            ],
        )
    }

    fn update_environment(&self, request: &UpdateEnvironment<'_>) -> ProviderResult<()> {
        let options = self.option_settings_arg("update-environment", request.options)?;
        self.cli.exec(
            SERVICE,
            "update-environment",
            &[
                "--application-name",
                request.application,
                "--environment-name",
                request.environment,
                "--version-label",
                request.version_label.as_str(),
                "--option-settings",
                options.as_str(),
            ],
        )
    }

    fn recent_events(
        &self,
        application: &str,
        environment: &str,
        limit: usize,
    ) -> ProviderResult<Vec<EnvironmentEvent>> {
        let max = limit.to_string();
        let response: DescribeEvents = self.cli.json(
            SERVICE,
            "describe-events",
            &[
                "--application-name",
                application,
                "--environment-name",
                environment,
                "--max-records",
                max.as_str(),
            ],
        )?;
        Ok(response
            .events
            .into_iter()
            .take(limit)
            .map(EnvironmentEvent::from)
            .collect())
    }
}
