//! Application platform port: applications, versions and environments

use crate::domain::entities::{
    EnvironmentEvent, EnvironmentHealth, EnvironmentStatus, OptionSettings,
};
use crate::domain::value_objects::{ArtifactLocation, VersionLabel};

use super::ProviderResult;

/// Request to create a new environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEnvironment<'a> {
    pub application: &'a str,
    pub environment: &'a str,
    pub version_label: &'a VersionLabel,
    pub solution_stack: &'a str,
    pub options: &'a OptionSettings,
}

/// Request to move an existing environment to a new version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEnvironment<'a> {
    pub application: &'a str,
    pub environment: &'a str,
    pub version_label: &'a VersionLabel,
    pub options: &'a OptionSettings,
}

pub trait EnvironmentService {
    fn application_exists(&self, application: &str) -> ProviderResult<bool>;

    fn create_application(&self, application: &str) -> ProviderResult<()>;

    fn create_application_version(
        &self,
        application: &str,
        version_label: &VersionLabel,
        source: &ArtifactLocation,
        description: &str,
    ) -> ProviderResult<()>;

    /// Current status, or `None` when no non-deleted environment has the name
    fn environment_status(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<EnvironmentStatus>>;

    fn environment_health(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<EnvironmentHealth>;

    /// VPC the existing environment is bound to, if it reports one
    fn environment_vpc(&self, application: &str, environment: &str)
        -> ProviderResult<Option<String>>;

    fn create_environment(&self, request: &CreateEnvironment<'_>) -> ProviderResult<()>;

    fn update_environment(&self, request: &UpdateEnvironment<'_>) -> ProviderResult<()>;

    /// Most recent events, newest first
    fn recent_events(
        &self,
        application: &str,
        environment: &str,
        limit: usize,
    ) -> ProviderResult<Vec<EnvironmentEvent>>;
}

impl<T: EnvironmentService + ?Sized> EnvironmentService for &T {
    fn application_exists(&self, application: &str) -> ProviderResult<bool> {
        (**self).application_exists(application)
    }

    fn create_application(&self, application: &str) -> ProviderResult<()> {
        (**self).create_application(application)
    }

    fn create_application_version(
        &self,
        application: &str,
        version_label: &VersionLabel,
        source: &ArtifactLocation,
        description: &str,
    ) -> ProviderResult<()> {
        (**self).create_application_version(application, version_label, source, description)
    }

    fn environment_status(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<EnvironmentStatus>> {
        (**self).environment_status(application, environment)
    }

    fn environment_health(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<EnvironmentHealth> {
        (**self).environment_health(application, environment)
    }

    fn environment_vpc(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<String>> {
        (**self).environment_vpc(application, environment)
    }

    fn create_environment(&self, request: &CreateEnvironment<'_>) -> ProviderResult<()> {
        (**self).create_environment(request)
    }

    fn update_environment(&self, request: &UpdateEnvironment<'_>) -> ProviderResult<()> {
        (**self).update_environment(request)
    }

    fn recent_events(
        &self,
        application: &str,
        environment: &str,
        limit: usize,
    ) -> ProviderResult<Vec<EnvironmentEvent>> {
        (**self).recent_events(application, environment, limit)
    }
}
