//! Property tests for the readiness waiter.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use proptest::prelude::*;

use ebdeploy::application::{classify, ReadinessWaiter, Verdict};
use ebdeploy::domain::entities::{EnvironmentEvent, EnvironmentHealth, EnvironmentStatus};
use ebdeploy::domain::ports::{
    Clock, CreateEnvironment, EnvironmentService, NoopEventSink, ProviderResult,
    UpdateEnvironment,
};
use ebdeploy::domain::value_objects::{ArtifactLocation, ReadinessPolicy, VersionLabel};
use ebdeploy::DeployError;

type Observation = (Option<EnvironmentStatus>, EnvironmentHealth);

/// Replays one observation per status query
struct ScriptedEnvironment {
    script: RefCell<VecDeque<Observation>>,
    current: RefCell<Option<Observation>>,
    health_queries: Cell<usize>,
}

impl ScriptedEnvironment {
    fn new(script: Vec<Observation>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            current: RefCell::new(None),
            health_queries: Cell::new(0),
        }
    }
}

impl EnvironmentService for ScriptedEnvironment {
    fn application_exists(&self, _application: &str) -> ProviderResult<bool> {
        Ok(true)
    }

    fn create_application(&self, _application: &str) -> ProviderResult<()> {
        Ok(())
    }

    fn create_application_version(
        &self,
        _application: &str,
        _version_label: &VersionLabel,
        _source: &ArtifactLocation,
        _description: &str,
    ) -> ProviderResult<()> {
        Ok(())
    }

    fn environment_status(
        &self,
        _application: &str,
        _environment: &str,
    ) -> ProviderResult<Option<EnvironmentStatus>> {
        let next = self.script.borrow_mut().pop_front();
        let status = next.as_ref().and_then(|(s, _)| s.clone());
        *self.current.borrow_mut() = next;
        Ok(status)
    }

    fn environment_health(
        &self,
        _application: &str,
        _environment: &str,
    ) -> ProviderResult<EnvironmentHealth> {
        self.health_queries.set(self.health_queries.get() + 1);
        Ok(self
            .current
            .borrow()
            .as_ref()
            .map(|(_, h)| h.clone())
            .unwrap_or(EnvironmentHealth::Grey))
    }

    fn environment_vpc(&self, _application: &str, _environment: &str) -> ProviderResult<Option<String>> {
        Ok(None)
    }

    fn create_environment(&self, _request: &CreateEnvironment<'_>) -> ProviderResult<()> {
        Ok(())
    }

    fn update_environment(&self, _request: &UpdateEnvironment<'_>) -> ProviderResult<()> {
        Ok(())
    }

    fn recent_events(
        &self,
        _application: &str,
        _environment: &str,
        _limit: usize,
    ) -> ProviderResult<Vec<EnvironmentEvent>> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct CountingClock {
    sleeps: Cell<u32>,
}

impl Clock for CountingClock {
    fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

fn status() -> impl Strategy<Value = Option<EnvironmentStatus>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(EnvironmentStatus::Launching)),
        1 => Just(Some(EnvironmentStatus::Updating)),
        4 => Just(Some(EnvironmentStatus::Ready)),
        1 => Just(Some(EnvironmentStatus::Failed)),
        1 => Just(Some(EnvironmentStatus::Terminated)),
    ]
}

fn health() -> impl Strategy<Value = EnvironmentHealth> {
    prop_oneof![
        3 => Just(EnvironmentHealth::Grey),
        3 => Just(EnvironmentHealth::Yellow),
        1 => Just(EnvironmentHealth::Green),
        1 => Just(EnvironmentHealth::Red),
    ]
}

const MAX_ATTEMPTS: u32 = 30;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the waiter stops at the first decisive observation, succeeds
    /// only on Ready+Green, and never sleeps after its last poll.
    #[test]
    fn property_waiter_stops_at_first_decisive_poll(
        script in proptest::collection::vec((status(), health()), MAX_ATTEMPTS as usize)
    ) {
        let decisive = script
            .iter()
            .enumerate()
            .find_map(|(i, (s, h))| match classify(s.as_ref(), Some(h)) {
                Verdict::Pending => None,
                verdict => Some((i as u32 + 1, verdict)),
            });
        let ready_polls_until = |attempts: u32| {
            script
                .iter()
                .take(attempts as usize)
                .filter(|(s, _)| *s == Some(EnvironmentStatus::Ready))
                .count()
        };

        let environment = ScriptedEnvironment::new(script.clone());
        let clock = CountingClock::default();
        let policy = ReadinessPolicy::new(Duration::from_secs(20), MAX_ATTEMPTS);
        let result = ReadinessWaiter::new(&environment, &clock, &NoopEventSink, policy)
            .wait("shop", "shop-prod");

        match (decisive, result) {
            (Some((at, Verdict::Healthy)), Ok(attempts)) => {
                prop_assert_eq!(attempts, at);
                prop_assert_eq!(clock.sleeps.get(), at - 1);
                prop_assert_eq!(environment.health_queries.get(), ready_polls_until(at));
            }
            (Some((at, Verdict::Failed)), Err(DeployError::EnvironmentFailed { .. })) => {
                prop_assert_eq!(clock.sleeps.get(), at - 1);
                prop_assert_eq!(environment.health_queries.get(), ready_polls_until(at));
            }
            (None, Err(DeployError::ReadinessTimeout { attempts, waited_secs, .. })) => {
                prop_assert_eq!(attempts, MAX_ATTEMPTS);
                prop_assert_eq!(waited_secs, 20 * u64::from(MAX_ATTEMPTS - 1));
                prop_assert_eq!(clock.sleeps.get(), MAX_ATTEMPTS - 1);
            }
            (expected, actual) => {
                prop_assert!(false, "expected {:?}, got {:?}", expected, actual);
            }
        }
    }

    /// PROPERTY: only Ready+Green is healthy; a dead status always fails.
    #[test]
    fn property_classify_precedence(status in status(), health in health()) {
        let verdict = classify(status.as_ref(), Some(&health));
        let ready = status == Some(EnvironmentStatus::Ready);

        prop_assert_eq!(
            verdict == Verdict::Healthy,
            ready && health == EnvironmentHealth::Green
        );
        if matches!(status, Some(EnvironmentStatus::Failed | EnvironmentStatus::Terminated)) {
            prop_assert_eq!(verdict, Verdict::Failed);
        }
        if !ready && !status.as_ref().is_some_and(EnvironmentStatus::is_dead) {
            prop_assert_eq!(verdict, Verdict::Pending);
        }
    }
}
