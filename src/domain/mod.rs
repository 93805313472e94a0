//! Domain Layer
//!
//! Deployment concepts and the ports the provisioning steps talk through.
//!
//! ## Structure
//!
//! - `entities/` - Observed and desired state (environment status, network
//!   topology, option settings, trust policies)
//! - `value_objects/` - Immutable values (version label, artifact location,
//!   resource tags, readiness policy)
//! - `ports/` - Provider interfaces implemented by the infrastructure layer
//!
//! Nothing in here spawns processes or touches the file system.

pub mod entities;
pub mod ports;
pub mod value_objects;
