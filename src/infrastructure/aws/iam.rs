//! IAM adapter

use serde::Deserialize;

use super::cli::AwsCli;
use crate::domain::entities::TrustPolicy;
use crate::domain::ports::{IdentityService, ProviderError, ProviderResult};
use crate::infrastructure::fs::ScratchFiles;

const NO_SUCH_ENTITY: &[&str] = &["NoSuchEntity"];

/// Identity port over `aws iam`
pub struct IamCli {
    cli: AwsCli,
    scratch: ScratchFiles,
}

impl IamCli {
    pub fn new(cli: AwsCli, scratch: ScratchFiles) -> Self {
        Self { cli, scratch }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetInstanceProfile {
    instance_profile: InstanceProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceProfile {
    #[serde(default)]
    roles: Vec<RoleRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleRef {
    role_name: String,
}

fn profile_roles(response: GetInstanceProfile) -> Vec<String> {
    response
        .instance_profile
        .roles
        .into_iter()
        .map(|r| r.role_name)
        .collect()
}

impl IdentityService for IamCli {
    fn role_exists(&self, role: &str) -> ProviderResult<bool> {
        let found = self.cli.run_or_missing(
            "iam",
            "get-role",
            &["--role-name", role],
            NO_SUCH_ENTITY,
        )?;
        Ok(found.is_some())
    }

    fn create_role(&self, role: &str, trust: &TrustPolicy) -> ProviderResult<()> {
        let local_io = |message: String| ProviderError::LocalIo {
            operation: "iam create-role".to_string(),
            message,
        };
        let document = serde_json::to_vec_pretty(trust).map_err(|e| local_io(e.to_string()))?;
        let path = self
            .scratch
            .write_transient(&format!("{}-trust-policy.json", role), &document)
            .map_err(|e| local_io(e.to_string()))?;

        let policy_arg = format!("file://{}", path.display());
        self.cli.exec(
            "iam",
            "create-role",
            &[
                "--role-name",
                role,
                "--assume-role-policy-document",
                policy_arg.as_str(),
            ],
        )
    }

    fn attach_role_policy(&self, role: &str, policy_arn: &str) -> ProviderResult<()> {
        self.cli.exec(
            "iam",
            "attach-role-policy",
            &["--role-name", role, "--policy-arn", policy_arn],
        )
    }

    fn instance_profile_roles(&self, profile: &str) -> ProviderResult<Option<Vec<String>>> {
        let response: Option<GetInstanceProfile> = self.cli.json_or_missing(
            "iam",
            "get-instance-profile",
            &["--instance-profile-name", profile],
            NO_SUCH_ENTITY,
        )?;
        Ok(response.map(profile_roles))
    }

    fn create_instance_profile(&self, profile: &str) -> ProviderResult<()> {
        self.cli.exec(
            "iam",
            "create-instance-profile",
            &["--instance-profile-name", profile],
        )
    }

    fn add_role_to_instance_profile(&self, profile: &str, role: &str) -> ProviderResult<()> {
        self.cli.exec(
            "iam",
            "add-role-to-instance-profile",
            &["--instance-profile-name", profile, "--role-name", role],
        )
    }
}
