//! AWS Adapters
//!
//! Provider ports implemented by driving the `aws` command-line tool.
//!
//! - `cli` - Process runner and JSON parsing (`AwsCli`)
//! - `iam` - Roles and instance profiles (`IamCli`)
//! - `s3` - Artifact bucket and upload (`S3Cli`)
//! - `ec2` - VPC, subnets, gateway and routing (`Ec2Cli`)
//! - `beanstalk` - Applications, versions and environments (`BeanstalkCli`)

mod beanstalk;
pub(crate) mod cli;
mod ec2;
mod iam;
mod s3;

pub use beanstalk::BeanstalkCli;
pub use cli::AwsCli;
pub use ec2::Ec2Cli;
pub use iam::IamCli;
pub use s3::S3Cli;
