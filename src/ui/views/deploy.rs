use ebdeploy::{DeployError, DeployReport, DeploymentConfig};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::blocks::header::RunHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_deploy_header(
    config: &DeploymentConfig,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let target = format!("{} -> {}", config.application, config.environment);
    RunHeader::new(Icon::Deploy, target)
        .field("Version", config.version_label.as_str())
        .field("Region", config.region.as_str())
        .field("Artifact", config.artifact.display().to_string())
        .field("Bucket", config.bucket.as_str())
        .render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    report: &DeployReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.warnings.is_empty() {
        ResultSummary::success("Deploy Complete")
    } else {
        ResultSummary::partial("Deploy Complete")
    };

    summary.add_detail(
        "Environment",
        format!("{} ({})", report.environment, report.action.as_str()),
    );
    summary.add_detail("Version", report.version_label.as_str());
    summary.add_detail("Artifact", report.location.uri());
    summary.add_detail("VPC", report.topology.vpc_id.as_str());
    summary.add_detail(
        "Subnets",
        report
            .topology
            .public_subnets
            .iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    );
    summary.add_detail("Created", format!("{} resource(s)", report.created));
    summary.add_detail("Polls", report.attempts.to_string());

    for warning in &report.warnings {
        summary.add_warning(warning.as_str());
    }

    summary.render(supports_color, supports_unicode)
}

pub fn render_deploy_error(
    error: &DeployError,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let events = error
        .events()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>();

    let mut block = ErrorBlock::new(error.to_string()).with_context("Recent events", events);
    if let Some(fix) = fix_hint(error) {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

fn fix_hint(error: &DeployError) -> Option<&'static str> {
    match error {
        DeployError::ArtifactNotFound { .. } | DeployError::ArtifactNotFile { .. } => {
            Some("pass the bundle with --artifact <path>")
        }
        DeployError::InsufficientZones { .. } => {
            Some("choose a region with two zones, or pass both --public-subnet-1 and --public-subnet-2")
        }
        DeployError::ReadinessTimeout { .. } => {
            Some("the environment may still converge; rerun the same command to resume")
        }
        _ => None,
    }
}
