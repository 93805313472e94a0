//! Identity port: roles, managed policies and instance profiles

use crate::domain::entities::TrustPolicy;

use super::ProviderResult;

pub trait IdentityService {
    fn role_exists(&self, role: &str) -> ProviderResult<bool>;

    fn create_role(&self, role: &str, trust: &TrustPolicy) -> ProviderResult<()>;

    /// Attach a managed policy by ARN. Attaching an already attached policy succeeds.
    fn attach_role_policy(&self, role: &str, policy_arn: &str) -> ProviderResult<()>;

    /// Roles bound to the instance profile, or `None` if it does not exist
    fn instance_profile_roles(&self, profile: &str) -> ProviderResult<Option<Vec<String>>>;

    fn create_instance_profile(&self, profile: &str) -> ProviderResult<()>;

    fn add_role_to_instance_profile(&self, profile: &str, role: &str) -> ProviderResult<()>;
}

impl<T: IdentityService + ?Sized> IdentityService for &T {
    fn role_exists(&self, role: &str) -> ProviderResult<bool> {
        (**self).role_exists(role)
    }

    fn create_role(&self, role: &str, trust: &TrustPolicy) -> ProviderResult<()> {
        (**self).create_role(role, trust)
    }

    fn attach_role_policy(&self, role: &str, policy_arn: &str) -> ProviderResult<()> {
        (**self).attach_role_policy(role, policy_arn)
    }

    fn instance_profile_roles(&self, profile: &str) -> ProviderResult<Option<Vec<String>>> {
        (**self).instance_profile_roles(profile)
    }

    fn create_instance_profile(&self, profile: &str) -> ProviderResult<()> {
        (**self).create_instance_profile(profile)
    }

    fn add_role_to_instance_profile(&self, profile: &str, role: &str) -> ProviderResult<()> {
        (**self).add_role_to_instance_profile(profile, role)
    }
}
