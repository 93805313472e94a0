//! Version Registrar
//!
//! Application (describe-then-create), artifact upload, version registration.

use crate::application::deploy::DeploymentConfig;
use crate::application::storage::StorageProvisioner;
use crate::domain::ports::{
    ArtifactStorage, DeployEvent, DeployEventSink, EnvironmentService, ResourceKind,
};
use crate::domain::value_objects::{ArtifactInfo, ArtifactLocation};
use crate::error::DeployResult;

pub struct VersionRegistrar<'a, E, S> {
    environments: &'a E,
    storage: StorageProvisioner<'a, S>,
    events: &'a dyn DeployEventSink,
}

impl<'a, E: EnvironmentService, S: ArtifactStorage> VersionRegistrar<'a, E, S> {
    pub fn new(environments: &'a E, storage: &'a S, events: &'a dyn DeployEventSink) -> Self {
        Self {
            environments,
            storage: StorageProvisioner::new(storage, events),
            events,
        }
    }

    /// Register a new version for the validated artifact
    ///
    /// The upload happens before registration; an upload failure leaves no
    /// version behind.
    pub fn register(
        &self,
        config: &DeploymentConfig,
        artifact: &ArtifactInfo,
    ) -> DeployResult<ArtifactLocation> {
        self.ensure_application(&config.application)?;

        let location = ArtifactLocation::for_version(
            &config.bucket,
            &config.application,
            &config.version_label,
            artifact,
        );
        self.storage.upload(artifact, &location)?;

        let description = format!("ebdeploy {} ({} bytes)", artifact.digest, artifact.size);
        self.environments.create_application_version(
            &config.application,
            &config.version_label,
            &location,
            &description,
        )?;
        self.events.on_event(DeployEvent::ResourceCreated {
            kind: ResourceKind::ApplicationVersion,
            id: config.version_label.to_string(),
        });

        Ok(location)
    }

    fn ensure_application(&self, application: &str) -> DeployResult<()> {
        if self.environments.application_exists(application)? {
            if self.events.wants_detailed_events() {
                self.events.on_event(DeployEvent::ResourceFound {
                    kind: ResourceKind::Application,
                    id: application.to_string(),
                });
            }
            return Ok(());
        }

        self.environments.create_application(application)?;
        self.events.on_event(DeployEvent::ResourceCreated {
            kind: ResourceKind::Application,
            id: application.to_string(),
        });
        Ok(())
    }
}
