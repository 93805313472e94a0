//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Every step reports progress through an injected sink instead of printing.

use std::fmt;

/// Provisioning steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployStep {
    Artifact,
    Roles,
    Storage,
    Version,
    Network,
    Environment,
    Readiness,
}

impl DeployStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artifact => "artifact",
            Self::Roles => "roles",
            Self::Storage => "storage",
            Self::Version => "version",
            Self::Network => "network",
            Self::Environment => "environment",
            Self::Readiness => "readiness",
        }
    }

    /// Human-readable step title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Artifact => "Validating artifact",
            Self::Roles => "Provisioning IAM roles",
            Self::Storage => "Preparing artifact storage",
            Self::Version => "Registering application version",
            Self::Network => "Resolving network",
            Self::Environment => "Reconciling environment",
            Self::Readiness => "Waiting for environment",
        }
    }
}

/// Kinds of provider resources a run touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Role,
    RolePolicy,
    InstanceProfile,
    Bucket,
    Artifact,
    Application,
    ApplicationVersion,
    Vpc,
    Subnet,
    InternetGateway,
    RouteTable,
    Route,
    RouteTableAssociation,
    Environment,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::RolePolicy => "role_policy",
            Self::InstanceProfile => "instance_profile",
            Self::Bucket => "bucket",
            Self::Artifact => "artifact",
            Self::Application => "application",
            Self::ApplicationVersion => "application_version",
            Self::Vpc => "vpc",
            Self::Subnet => "subnet",
            Self::InternetGateway => "internet_gateway",
            Self::RouteTable => "route_table",
            Self::Route => "route",
            Self::RouteTableAssociation => "route_table_association",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Run started
    Started {
        application: String,
        environment: String,
        version_label: String,
        region: String,
    },

    /// A provisioning step started
    StepStarted { step: DeployStep },

    /// An existing resource was reused
    ResourceFound { kind: ResourceKind, id: String },

    /// A resource was created (or mutated into place)
    ResourceCreated { kind: ResourceKind, id: String },

    /// Non-fatal condition the operator should know about
    Warning { message: String },

    /// Deliberate pause
    Waiting { reason: String, seconds: u64 },

    /// One readiness poll
    Polled {
        attempt: u32,
        max_attempts: u32,
        status: String,
        health: Option<String>,
    },

    /// A provisioning step finished
    StepCompleted { step: DeployStep },

    /// Environment is ready and healthy
    Completed {
        environment: String,
        action: String,
        attempts: u32,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `ConsoleEventSink`: progress lines in the terminal
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Whether this sink wants per-resource events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
