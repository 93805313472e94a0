//! Domain Entities
//!
//! - `EnvironmentStatus` / `EnvironmentHealth` - Observed environment state
//! - `NetworkTopology` - The resolved VPC, subnets, gateway and route table
//! - `OptionSettings` - Declarative environment configuration
//! - `TrustPolicy` - Role assumption policy document

mod environment;
mod network;
mod option_settings;
mod trust_policy;

pub use environment::{
    EnvironmentEvent, EnvironmentHealth, EnvironmentPresence, EnvironmentStatus,
};
pub use network::{NetworkTopology, RouteTableInfo, SubnetInfo, SubnetRef};
pub use option_settings::{
    namespaces, OptionSetting, OptionSettingError, OptionSettings, OptionSettingsBuilder,
};
pub use trust_policy::TrustPolicy;
