//! Role Provisioner
//!
//! Ensures the platform service role and the instance role (with its instance
//! profile) exist. With everything in place only existence checks are made.

use crate::application::deploy::RoleNames;
use crate::domain::entities::TrustPolicy;
use crate::domain::ports::{Clock, DeployEvent, DeployEventSink, IdentityService, ResourceKind};
use crate::error::DeployResult;

pub const SERVICE_PRINCIPAL: &str = "elasticbeanstalk.amazonaws.com";
pub const INSTANCE_PRINCIPAL: &str = "ec2.amazonaws.com";

pub const SERVICE_ROLE_POLICIES: &[&str] = &[
    "arn:aws:iam::aws:policy/service-role/AWSElasticBeanstalkEnhancedHealth",
    "arn:aws:iam::aws:policy/AWSElasticBeanstalkManagedUpdatesCustomerRolePolicy",
];

pub const INSTANCE_ROLE_POLICIES: &[&str] = &[
    "arn:aws:iam::aws:policy/AWSElasticBeanstalkWebTier",
    "arn:aws:iam::aws:policy/AWSElasticBeanstalkWorkerTier",
    "arn:aws:iam::aws:policy/AWSElasticBeanstalkMulticontainerDocker",
];

pub struct RoleProvisioner<'a, I, C> {
    identity: &'a I,
    clock: &'a C,
    events: &'a dyn DeployEventSink,
}

impl<'a, I: IdentityService, C: Clock> RoleProvisioner<'a, I, C> {
    pub fn new(identity: &'a I, clock: &'a C, events: &'a dyn DeployEventSink) -> Self {
        Self {
            identity,
            clock,
            events,
        }
    }

    pub fn ensure(&self, roles: &RoleNames) -> DeployResult<()> {
        self.ensure_role(&roles.service_role, SERVICE_PRINCIPAL, SERVICE_ROLE_POLICIES)?;
        self.ensure_role(&roles.instance_role, INSTANCE_PRINCIPAL, INSTANCE_ROLE_POLICIES)?;

        if self.ensure_instance_profile(&roles.instance_role)? {
            // The provider rejects a fresh profile until the binding propagates
            self.events.on_event(DeployEvent::Waiting {
                reason: format!("instance profile {} to propagate", roles.instance_role),
                seconds: roles.settle_delay.as_secs(),
            });
            self.clock.sleep(roles.settle_delay);
        }
        Ok(())
    }

    fn ensure_role(&self, role: &str, principal: &str, policies: &[&str]) -> DeployResult<()> {
        if self.identity.role_exists(role)? {
            self.found(ResourceKind::Role, role);
            return Ok(());
        }

        self.identity
            .create_role(role, &TrustPolicy::for_service(principal))?;
        self.created(ResourceKind::Role, role);

        for arn in policies {
            self.identity.attach_role_policy(role, arn)?;
            self.created(ResourceKind::RolePolicy, &format!("{} <- {}", role, arn));
        }
        Ok(())
    }

    /// Returns whether the role was newly bound to the profile
    fn ensure_instance_profile(&self, role: &str) -> DeployResult<bool> {
        let profile = role;
        match self.identity.instance_profile_roles(profile)? {
            Some(bound) if bound.iter().any(|r| r == role) => {
                self.found(ResourceKind::InstanceProfile, profile);
                Ok(false)
            }
            Some(_) => {
                self.identity.add_role_to_instance_profile(profile, role)?;
                self.created(ResourceKind::InstanceProfile, profile);
                Ok(true)
            }
            None => {
                self.identity.create_instance_profile(profile)?;
                self.identity.add_role_to_instance_profile(profile, role)?;
                self.created(ResourceKind::InstanceProfile, profile);
                Ok(true)
            }
        }
    }

    fn found(&self, kind: ResourceKind, id: &str) {
        if self.events.wants_detailed_events() {
            self.events.on_event(DeployEvent::ResourceFound {
                kind,
                id: id.to_string(),
            });
        }
    }

    fn created(&self, kind: ResourceKind, id: &str) {
        self.events.on_event(DeployEvent::ResourceCreated {
            kind,
            id: id.to_string(),
        });
    }
}
