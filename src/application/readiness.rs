//! Readiness Waiter
//!
//! Fixed-interval, bounded polling expressed as an explicit state machine.
//! Health is only queried once the environment reports `Ready`.

use crate::domain::entities::{EnvironmentHealth, EnvironmentStatus};
use crate::domain::ports::{Clock, DeployEvent, DeployEventSink, EnvironmentService};
use crate::domain::value_objects::ReadinessPolicy;
use crate::error::{DeployError, DeployResult};

/// Events fetched for triage when the environment fails
pub const FAILURE_EVENT_LIMIT: usize = 10;

/// Outcome of a single observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Healthy,
    Failed,
    Pending,
}

/// Classify one observation
///
/// `Failed`, `Terminating` and `Terminated` fail immediately, as does `Ready`
/// with `Red` health. Only `Ready` with `Green` health succeeds. A missing
/// status means the environment is not visible yet.
pub fn classify(
    status: Option<&EnvironmentStatus>,
    health: Option<&EnvironmentHealth>,
) -> Verdict {
    match status {
        None => Verdict::Pending,
        Some(status) if status.is_dead() => Verdict::Failed,
        Some(EnvironmentStatus::Ready) => match health {
            Some(health) if health.is_healthy() => Verdict::Healthy,
            Some(health) if health.is_unhealthy() => Verdict::Failed,
            _ => Verdict::Pending,
        },
        Some(_) => Verdict::Pending,
    }
}

/// Waiter state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessState {
    /// About to make poll number `attempt` (1-based)
    Polling { attempt: u32 },
    Healthy { attempts: u32 },
    Failed {
        status: EnvironmentStatus,
        health: Option<EnvironmentHealth>,
        attempts: u32,
    },
    TimedOut { attempts: u32 },
}

pub struct ReadinessWaiter<'a, E, C> {
    environments: &'a E,
    clock: &'a C,
    events: &'a dyn DeployEventSink,
    policy: ReadinessPolicy,
}

impl<'a, E: EnvironmentService, C: Clock> ReadinessWaiter<'a, E, C> {
    pub fn new(
        environments: &'a E,
        clock: &'a C,
        events: &'a dyn DeployEventSink,
        policy: ReadinessPolicy,
    ) -> Self {
        Self {
            environments,
            clock,
            events,
            policy,
        }
    }

    /// Poll until healthy; returns the number of polls made
    pub fn wait(&self, application: &str, environment: &str) -> DeployResult<u32> {
        let mut state = ReadinessState::Polling { attempt: 1 };
        loop {
            state = match state {
                ReadinessState::Polling { attempt } => self.step(
                    application,
                    environment,
                    ReadinessState::Polling { attempt },
                )?,
                ReadinessState::Healthy { attempts } => return Ok(attempts),
                ReadinessState::Failed { status, health, .. } => {
                    return Err(self.failure(application, environment, status, health))
                }
                ReadinessState::TimedOut { attempts } => {
                    return Err(DeployError::ReadinessTimeout {
                        environment: environment.to_string(),
                        attempts,
                        waited_secs: (self.policy.interval * attempts.saturating_sub(1)).as_secs(),
                    })
                }
            };
        }
    }

    /// Advance the machine by one transition
    pub fn step(
        &self,
        application: &str,
        environment: &str,
        state: ReadinessState,
    ) -> DeployResult<ReadinessState> {
        let ReadinessState::Polling { attempt } = state else {
            return Ok(state);
        };

        let status = self.environments.environment_status(application, environment)?;
        let health = match status {
            Some(EnvironmentStatus::Ready) => Some(
                self.environments
                    .environment_health(application, environment)?,
            ),
            _ => None,
        };

        self.events.on_event(DeployEvent::Polled {
            attempt,
            max_attempts: self.policy.max_attempts,
            status: status
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "Missing".to_string()),
            health: health.as_ref().map(|h| h.as_str().to_string()),
        });

        let next = match classify(status.as_ref(), health.as_ref()) {
            Verdict::Healthy => ReadinessState::Healthy { attempts: attempt },
            Verdict::Failed => ReadinessState::Failed {
                status: status.unwrap_or(EnvironmentStatus::Failed),
                health,
                attempts: attempt,
            },
            Verdict::Pending if attempt >= self.policy.max_attempts => {
                ReadinessState::TimedOut { attempts: attempt }
            }
            Verdict::Pending => {
                self.clock.sleep(self.policy.interval);
                ReadinessState::Polling {
                    attempt: attempt + 1,
                }
            }
        };
        Ok(next)
    }

    fn failure(
        &self,
        application: &str,
        environment: &str,
        status: EnvironmentStatus,
        health: Option<EnvironmentHealth>,
    ) -> DeployError {
        let events = match self
            .environments
            .recent_events(application, environment, FAILURE_EVENT_LIMIT)
        {
            Ok(events) => events,
            Err(e) => {
                self.events.on_event(DeployEvent::Warning {
                    message: format!("could not fetch recent events: {}", e),
                });
                Vec::new()
            }
        };

        DeployError::EnvironmentFailed {
            environment: environment.to_string(),
            status: status.as_str().to_string(),
            health: health
                .map(|h| h.as_str().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            events,
        }
    }
}
