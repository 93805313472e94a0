//! S3 adapter

use std::path::Path;

use super::cli::AwsCli;
use crate::domain::ports::{ArtifactStorage, ProviderError, ProviderResult};
use crate::domain::value_objects::{ArtifactLocation, BucketLocation};

/// `head-bucket` answers a missing bucket with a bare 404
const NOT_FOUND: &[&str] = &["Not Found", "NoSuchBucket", "(404)"];

/// Artifact storage port over `aws s3api`
pub struct S3Cli {
    cli: AwsCli,
}

impl S3Cli {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }
}

/// `--create-bucket-configuration` value, if the location needs one
fn bucket_configuration(location: &BucketLocation) -> Option<String> {
    match location {
        BucketLocation::DefaultRegion => None,
        BucketLocation::Constraint(region) => Some(format!("LocationConstraint={}", region)),
    }
}

impl ArtifactStorage for S3Cli {
    fn bucket_exists(&self, bucket: &str) -> ProviderResult<bool> {
        let found = self
            .cli
            .run_or_missing("s3api", "head-bucket", &["--bucket", bucket], NOT_FOUND)?;
        Ok(found.is_some())
    }

    fn create_bucket(&self, bucket: &str, location: &BucketLocation) -> ProviderResult<()> {
        match bucket_configuration(location) {
            Some(config) => self.cli.exec(
                "s3api",
                "create-bucket",
                &[
                    "--bucket",
                    bucket,
                    "--create-bucket-configuration",
                    config.as_str(),
                ],
            ),
            None => self
                .cli
                .exec("s3api", "create-bucket", &["--bucket", bucket]),
        }
    }

    fn upload(&self, local: &Path, location: &ArtifactLocation) -> ProviderResult<()> {
        let body = local.to_str().ok_or_else(|| ProviderError::LocalIo {
            operation: "s3api put-object".to_string(),
            message: format!("artifact path is not valid UTF-8: {}", local.display()),
        })?;
        self.cli.exec(
            "s3api",
            "put-object",
            &[
                "--bucket",
                location.bucket.as_str(),
                "--key",
                location.key.as_str(),
                "--body",
                body,
            ],
        )
    }
}
