//! Domain Ports (Interfaces)
//!
//! The provisioning steps only ever talk to these traits. The infrastructure
//! layer implements them on top of the provider command-line tool; tests
//! implement them in memory.

pub mod clock;
pub mod deploy_events;
pub mod environments;
pub mod identity;
pub mod network;
pub mod provider_error;
pub mod storage;

pub use clock::Clock;
pub use deploy_events::{DeployEvent, DeployEventSink, DeployStep, NoopEventSink, ResourceKind};
pub use environments::{CreateEnvironment, EnvironmentService, UpdateEnvironment};
pub use identity::IdentityService;
pub use network::{NetworkService, Tags};
pub use provider_error::{ProviderError, ProviderResult};
pub use storage::ArtifactStorage;
