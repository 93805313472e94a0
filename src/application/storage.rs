//! Storage Provisioner
//!
//! Artifact bucket (region-aware creation) and artifact upload.

use crate::domain::ports::{ArtifactStorage, DeployEvent, DeployEventSink, ResourceKind};
use crate::domain::value_objects::{ArtifactInfo, ArtifactLocation, BucketLocation};
use crate::error::DeployResult;

pub struct StorageProvisioner<'a, S> {
    storage: &'a S,
    events: &'a dyn DeployEventSink,
}

impl<'a, S: ArtifactStorage> StorageProvisioner<'a, S> {
    pub fn new(storage: &'a S, events: &'a dyn DeployEventSink) -> Self {
        Self { storage, events }
    }

    /// Head the bucket; create it in `region` when missing
    pub fn ensure_bucket(&self, bucket: &str, region: &str) -> DeployResult<()> {
        if self.storage.bucket_exists(bucket)? {
            if self.events.wants_detailed_events() {
                self.events.on_event(DeployEvent::ResourceFound {
                    kind: ResourceKind::Bucket,
                    id: bucket.to_string(),
                });
            }
            return Ok(());
        }

        self.storage
            .create_bucket(bucket, &BucketLocation::for_region(region))?;
        self.events.on_event(DeployEvent::ResourceCreated {
            kind: ResourceKind::Bucket,
            id: bucket.to_string(),
        });
        Ok(())
    }

    /// Upload the artifact, replacing any object at the same key
    pub fn upload(&self, artifact: &ArtifactInfo, location: &ArtifactLocation) -> DeployResult<()> {
        self.storage.upload(&artifact.path, location)?;
        self.events.on_event(DeployEvent::ResourceCreated {
            kind: ResourceKind::Artifact,
            id: location.uri(),
        });
        Ok(())
    }
}
