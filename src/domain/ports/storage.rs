//! Object storage port

use std::path::Path;

use crate::domain::value_objects::{ArtifactLocation, BucketLocation};

use super::ProviderResult;

pub trait ArtifactStorage {
    fn bucket_exists(&self, bucket: &str) -> ProviderResult<bool>;

    fn create_bucket(&self, bucket: &str, location: &BucketLocation) -> ProviderResult<()>;

    /// Upload a local file, overwriting any object already at the location
    fn upload(&self, local: &Path, location: &ArtifactLocation) -> ProviderResult<()>;
}

impl<T: ArtifactStorage + ?Sized> ArtifactStorage for &T {
    fn bucket_exists(&self, bucket: &str) -> ProviderResult<bool> {
        (**self).bucket_exists(bucket)
    }

    fn create_bucket(&self, bucket: &str, location: &BucketLocation) -> ProviderResult<()> {
        (**self).create_bucket(bucket, location)
    }

    fn upload(&self, local: &Path, location: &ArtifactLocation) -> ProviderResult<()> {
        (**self).upload(local, location)
    }
}
