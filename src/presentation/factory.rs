//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{DeployUseCase, DeploymentConfig};
use crate::infrastructure::{AwsCli, BeanstalkCli, Ec2Cli, IamCli, S3Cli, ScratchFiles, SystemClock};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<IamCli, S3Cli, Ec2Cli, BeanstalkCli, SystemClock>;

/// Create a deploy use case driving the `aws` tool in the configured region
///
/// Documents written for provider calls are registered with `scratch`, which
/// the caller cleans up at exit.
pub fn create_deploy_use_case(
    config: &DeploymentConfig,
    scratch: &ScratchFiles,
) -> ConcreteDeployUseCase {
    create_deploy_use_case_with_cli(AwsCli::new(&config.region), config, scratch)
}

/// Create a deploy use case around a specific CLI runner
pub fn create_deploy_use_case_with_cli(
    cli: AwsCli,
    config: &DeploymentConfig,
    scratch: &ScratchFiles,
) -> ConcreteDeployUseCase {
    DeployUseCase::new(
        IamCli::new(cli.clone(), scratch.clone()),
        S3Cli::new(cli.clone()),
        Ec2Cli::new(cli.clone()),
        BeanstalkCli::new(cli, scratch.clone(), config.option_settings_path()),
        SystemClock,
    )
}
