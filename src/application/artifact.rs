//! Artifact Validator
//!
//! Local preconditions on the deployment bundle, checked before any provider call.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::value_objects::ArtifactInfo;
use crate::error::{DeployError, DeployResult};

pub struct ArtifactValidator;

impl ArtifactValidator {
    /// Confirm the artifact exists, is a regular file and is non-empty
    ///
    /// Symlinks are followed. The returned info carries the content digest.
    pub fn validate(path: &Path) -> DeployResult<ArtifactInfo> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DeployError::ArtifactNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(DeployError::ArtifactRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if !metadata.is_file() {
            return Err(DeployError::ArtifactNotFile {
                path: path.to_path_buf(),
            });
        }
        if metadata.len() == 0 {
            return Err(DeployError::ArtifactEmpty {
                path: path.to_path_buf(),
            });
        }

        let digest = digest_file(path).map_err(|source| DeployError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ArtifactInfo {
            path: path.to_path_buf(),
            size: metadata.len(),
            digest,
        })
    }
}

fn digest_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("sha256:{:x}", hasher.finalize()))
}
