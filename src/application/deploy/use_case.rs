//! Deploy Use Case
//!
//! Runs the provisioning steps in fixed order:
//! 1. Validate the local artifact
//! 2. Ensure IAM roles and the instance profile
//! 3. Ensure the artifact bucket
//! 4. Upload the artifact and register the application version
//! 5. Resolve or create the network
//! 6. Create or update the environment
//! 7. Wait for the environment to become healthy
//!
//! Any error stops the run; nothing is retried or rolled back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::artifact::ArtifactValidator;
use crate::application::network::NetworkProvisioner;
use crate::application::readiness::ReadinessWaiter;
use crate::application::reconcile::EnvironmentReconciler;
use crate::application::roles::RoleProvisioner;
use crate::application::storage::StorageProvisioner;
use crate::application::version::VersionRegistrar;
use crate::domain::ports::{
    ArtifactStorage, Clock, DeployEvent, DeployEventSink, DeployStep, EnvironmentService,
    IdentityService, NetworkService, NoopEventSink,
};
use crate::error::DeployResult;

use super::options::DeploymentConfig;
use super::result::DeployReport;

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by the provider ports so tests can run it against an
/// in-memory cloud.
pub struct DeployUseCase<I, S, N, E, C>
where
    I: IdentityService,
    S: ArtifactStorage,
    N: NetworkService,
    E: EnvironmentService,
    C: Clock,
{
    identity: I,
    storage: S,
    network: N,
    environments: E,
    clock: C,
}

impl<I, S, N, E, C> DeployUseCase<I, S, N, E, C>
where
    I: IdentityService,
    S: ArtifactStorage,
    N: NetworkService,
    E: EnvironmentService,
    C: Clock,
{
    pub fn new(identity: I, storage: S, network: N, environments: E, clock: C) -> Self {
        Self {
            identity,
            storage,
            network,
            environments,
            clock,
        }
    }

    /// Execute the deploy use case
    pub fn execute(&self, config: &DeploymentConfig) -> DeployResult<DeployReport> {
        self.execute_with_events(config, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        config: &DeploymentConfig,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> DeployResult<DeployReport> {
        let tally = RunTally::new(event_sink.as_ref());
        let events: &dyn DeployEventSink = &tally;

        events.on_event(DeployEvent::Started {
            application: config.application.clone(),
            environment: config.environment.clone(),
            version_label: config.version_label.to_string(),
            region: config.region.clone(),
        });

        let artifact = run_step(events, DeployStep::Artifact, || {
            ArtifactValidator::validate(&config.artifact)
        })?;

        run_step(events, DeployStep::Roles, || {
            RoleProvisioner::new(&self.identity, &self.clock, events).ensure(&config.roles)
        })?;

        run_step(events, DeployStep::Storage, || {
            StorageProvisioner::new(&self.storage, events)
                .ensure_bucket(&config.bucket, &config.region)
        })?;

        let location = run_step(events, DeployStep::Version, || {
            VersionRegistrar::new(&self.environments, &self.storage, events)
                .register(config, &artifact)
        })?;

        let topology = run_step(events, DeployStep::Network, || {
            NetworkProvisioner::new(&self.network, &config.region, events).ensure(&config.network)
        })?;

        let action = run_step(events, DeployStep::Environment, || {
            EnvironmentReconciler::new(&self.environments, events).reconcile(config, &topology)
        })?;

        let attempts = run_step(events, DeployStep::Readiness, || {
            ReadinessWaiter::new(&self.environments, &self.clock, events, config.readiness)
                .wait(&config.application, &config.environment)
        })?;

        events.on_event(DeployEvent::Completed {
            environment: config.environment.clone(),
            action: action.as_str().to_string(),
            attempts,
        });

        Ok(DeployReport {
            application: config.application.clone(),
            environment: config.environment.clone(),
            version_label: config.version_label.clone(),
            artifact,
            location,
            topology,
            action,
            attempts,
            created: tally.created(),
            warnings: tally.warnings(),
        })
    }
}

fn run_step<T>(
    events: &dyn DeployEventSink,
    step: DeployStep,
    f: impl FnOnce() -> DeployResult<T>,
) -> DeployResult<T> {
    events.on_event(DeployEvent::StepStarted { step });
    let value = f()?;
    events.on_event(DeployEvent::StepCompleted { step });
    Ok(value)
}

/// Forwards events while counting created resources and collecting warnings
struct RunTally<'a> {
    inner: &'a dyn DeployEventSink,
    created: AtomicUsize,
    warnings: Mutex<Vec<String>>,
}

impl<'a> RunTally<'a> {
    fn new(inner: &'a dyn DeployEventSink) -> Self {
        Self {
            inner,
            created: AtomicUsize::new(0),
            warnings: Mutex::new(Vec::new()),
        }
    }

    fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }
}

impl DeployEventSink for RunTally<'_> {
    fn on_event(&self, event: DeployEvent) {
        match &event {
            DeployEvent::ResourceCreated { .. } => {
                self.created.fetch_add(1, Ordering::Relaxed);
            }
            DeployEvent::Warning { message } => {
                if let Ok(mut warnings) = self.warnings.lock() {
                    warnings.push(message.clone());
                }
            }
            _ => {}
        }
        self.inner.on_event(event);
    }

    fn wants_detailed_events(&self) -> bool {
        self.inner.wants_detailed_events()
    }
}
