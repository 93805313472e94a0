//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `aws/` - Provider ports over the `aws` command-line tool
//! - `events/` - Event sinks (NDJSON)
//! - `fs/` - Locally written documents and their cleanup
//! - `clock` - Real sleeping clock

pub mod aws;
pub mod clock;
pub mod events;
pub mod fs;

// Re-export for convenience
pub use aws::{AwsCli, BeanstalkCli, Ec2Cli, IamCli, S3Cli};
pub use clock::SystemClock;
pub use events::JsonEventSink;
pub use fs::ScratchFiles;
