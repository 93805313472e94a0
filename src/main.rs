//! ebdeploy - idempotent deployment to a managed application environment
//!
//! Usage: ebdeploy --app <NAME> --env <NAME> [OPTIONS]
//!
//! Every run converges roles, artifact storage, application version, network
//! and environment, then waits until the environment is ready and healthy.

mod ui;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ebdeploy::config::{self, Config, LoadedConfig, Resolved};
use ebdeploy::domain::ports::{DeployEvent, DeployEventSink};
use ebdeploy::infrastructure::{JsonEventSink, ScratchFiles};
use ebdeploy::presentation::{create_deploy_use_case, Cli};
use ebdeploy::DeployError;

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::deploy::{render_deploy_error, render_deploy_header, render_deploy_summary};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version go to stdout and are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one deployment; `Ok(false)` means the failure was already reported
fn run(cli: &Cli) -> Result<bool> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;

    let (loaded, resolved) = match prepare(cli, &cwd) {
        Ok(prepared) => prepared,
        Err(err) => {
            let ui = UiContext::new(cli.json, cli.verbose, cli.color, &Config::default());
            let json = ui.json.then(JsonEventSink::stdout);
            report_failure(&ui, json.as_ref(), &err);
            return Ok(false);
        }
    };

    let config = resolved.config;
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &loaded.config);

    let scratch = ScratchFiles::new(&config.state_dir);
    install_interrupt_cleanup(scratch.clone(), config.clean_all)?;

    let json = ui.json.then(|| Arc::new(JsonEventSink::stdout()));
    let sink: Arc<dyn DeployEventSink> = match &json {
        Some(json) => Arc::clone(json) as Arc<dyn DeployEventSink>,
        None => Arc::new(ConsoleEventSink::stdout(ui)),
    };

    if !ui.json {
        print!("{}", render_deploy_header(&config, ui.color, ui.unicode));
        if let Some(source) = &loaded.source {
            if ui.verbose > 0 {
                println!(
                    "{}",
                    ColoredText::dim(format!("Config: {}", source.display())).render(ui.color)
                );
            }
        }
        println!();
    }

    let warnings = loaded
        .warnings
        .iter()
        .map(|w| w.to_string())
        .chain(resolved.warnings);
    for message in warnings {
        sink.on_event(DeployEvent::Warning { message });
    }

    let use_case = create_deploy_use_case(&config, &scratch);
    let succeeded = match use_case.execute_with_events(&config, Arc::clone(&sink)) {
        Ok(report) => {
            if !ui.json {
                print!("{}", render_deploy_summary(&report, ui.color, ui.unicode));
            }
            true
        }
        Err(err) => {
            report_failure(&ui, json.as_deref(), &err);
            false
        }
    };

    let removed = scratch.cleanup(config.clean_all);
    if let Some(json) = &json {
        if !removed.is_empty() {
            json.emit(serde_json::json!({
                "event": "cleanup",
                "command": "deploy",
                "removed": removed.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            }));
        }
    } else if ui.verbose > 0 {
        for path in &removed {
            println!(
                "{}",
                ColoredText::dim(format!("removed {}", path.display())).render(ui.color)
            );
        }
    }

    Ok(succeeded)
}

fn prepare(cli: &Cli, cwd: &Path) -> Result<(LoadedConfig, Resolved), DeployError> {
    let loaded = config::discover(cli.config.as_deref(), cwd)?;
    let resolved = config::resolve(
        cli.deploy_args(),
        &loaded.config,
        |key| std::env::var(key).ok(),
        chrono::Utc::now(),
    )?;
    Ok((loaded, resolved))
}

fn report_failure(ui: &UiContext, json: Option<&JsonEventSink>, err: &DeployError) {
    if let Some(json) = json {
        json.on_error(err);
        return;
    }

    eprint!("{}", render_deploy_error(err, ui.color, ui.unicode));
    if ui.annotations {
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, &err.to_string(), Some("ebdeploy"))
        );
    }
}

/// Remove transient files and exit 1 on Ctrl+C; provider work is not rolled back
fn install_interrupt_cleanup(scratch: ScratchFiles, clean_all: bool) -> Result<()> {
    ctrlc::set_handler(move || {
        scratch.cleanup(clean_all);
        eprintln!("\ninterrupted; provider resources created so far are kept");
        std::process::exit(1);
    })
    .context("failed to install the Ctrl+C handler")
}
