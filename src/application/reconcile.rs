//! Environment Reconciler
//!
//! Create-vs-update decision for the named environment. The network binding
//! is sent only on creation; an existing environment keeps its VPC.

use crate::application::deploy::{DeploymentConfig, ReconcileAction};
use crate::domain::entities::{
    EnvironmentPresence, NetworkTopology, OptionSettings, OptionSettingsBuilder,
};
use crate::domain::ports::{
    CreateEnvironment, DeployEvent, DeployEventSink, EnvironmentService, ResourceKind,
    UpdateEnvironment,
};
use crate::error::DeployResult;

pub struct EnvironmentReconciler<'a, E> {
    environments: &'a E,
    events: &'a dyn DeployEventSink,
}

impl<'a, E: EnvironmentService> EnvironmentReconciler<'a, E> {
    pub fn new(environments: &'a E, events: &'a dyn DeployEventSink) -> Self {
        Self {
            environments,
            events,
        }
    }

    pub fn reconcile(
        &self,
        config: &DeploymentConfig,
        topology: &NetworkTopology,
    ) -> DeployResult<ReconcileAction> {
        let status = self
            .environments
            .environment_status(&config.application, &config.environment)?;

        match EnvironmentPresence::from_status(status) {
            EnvironmentPresence::Exists(status) => {
                if self.events.wants_detailed_events() {
                    self.events.on_event(DeployEvent::ResourceFound {
                        kind: ResourceKind::Environment,
                        id: format!("{} ({})", config.environment, status),
                    });
                }
                self.update(config, topology)?;
                Ok(ReconcileAction::Updated)
            }
            EnvironmentPresence::NotExists => {
                self.create(config, topology)?;
                Ok(ReconcileAction::Created)
            }
        }
    }

    fn update(&self, config: &DeploymentConfig, topology: &NetworkTopology) -> DeployResult<()> {
        let bound = self
            .environments
            .environment_vpc(&config.application, &config.environment)?;
        if let Some(bound) = bound.filter(|vpc| *vpc != topology.vpc_id) {
            self.events.on_event(DeployEvent::Warning {
                message: format!(
                    "environment {} is bound to {}, not {}; keeping the existing network",
                    config.environment, bound, topology.vpc_id
                ),
            });
        }

        let options = base_options(config).build()?;
        self.environments.update_environment(&UpdateEnvironment {
            application: &config.application,
            environment: &config.environment,
            version_label: &config.version_label,
            options: &options,
        })?;
        Ok(())
    }

    fn create(&self, config: &DeploymentConfig, topology: &NetworkTopology) -> DeployResult<()> {
        let options: OptionSettings = base_options(config).network(topology).build()?;
        self.environments.create_environment(&CreateEnvironment {
            application: &config.application,
            environment: &config.environment,
            version_label: &config.version_label,
            solution_stack: &config.solution_stack,
            options: &options,
        })?;
        self.events.on_event(DeployEvent::ResourceCreated {
            kind: ResourceKind::Environment,
            id: config.environment.clone(),
        });
        Ok(())
    }
}

/// Settings applied on both create and update
fn base_options(config: &DeploymentConfig) -> OptionSettingsBuilder {
    OptionSettingsBuilder::new()
        .instance_profile(&config.roles.instance_role)
        .instance_type(&config.instance_type)
        .service_role(&config.roles.service_role)
        .load_balanced()
        .enhanced_health()
        .scaling(config.scaling.min, config.scaling.max)
}
