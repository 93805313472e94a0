//! Console Event Sink
//!
//! Renders deploy progress as terminal lines. Existing resources are only
//! listed with `-v`.

use std::io::{self, Write};
use std::sync::Mutex;

use ebdeploy::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    ui: UiContext,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Lines for one event; `None` when the event is not shown
    pub fn render(&self, event: &DeployEvent) -> Option<String> {
        let color = self.ui.color;
        let unicode = self.ui.unicode;

        let line = match event {
            // The header is printed before the run starts
            DeployEvent::Started { .. } | DeployEvent::Completed { .. } => return None,

            DeployEvent::StepStarted { step } => format!(
                "{} {}",
                Icon::Progress.colored(color, unicode),
                ColoredText::info(step.title()).bold().render(color)
            ),

            DeployEvent::StepCompleted { .. } if self.ui.verbose == 0 => return None,
            DeployEvent::StepCompleted { step } => format!(
                "  {}",
                ColoredText::dim(format!("{} done", step.as_str())).render(color)
            ),

            DeployEvent::ResourceFound { kind, id } => format!(
                "  {} {}",
                Icon::Success.colored(color, unicode),
                ColoredText::dim(format!("{} {} (exists)", kind, id)).render(color)
            ),

            DeployEvent::ResourceCreated { kind, id } => format!(
                "  {} {} {}",
                Icon::Created.colored(color, unicode),
                kind,
                id
            ),

            DeployEvent::Warning { message } => {
                let mut line = format!("  {} {}", Icon::Warning.colored(color, unicode), message);
                if self.ui.annotations {
                    line.push('\n');
                    line.push_str(&github_actions_annotation(
                        AnnotationLevel::Warning,
                        message,
                        Some("ebdeploy"),
                    ));
                }
                line
            }

            DeployEvent::Waiting { reason, seconds } => format!(
                "  {} waiting {}s for {}",
                Icon::Wait.colored(color, unicode),
                seconds,
                reason
            ),

            DeployEvent::Polled {
                attempt,
                max_attempts,
                status,
                health,
            } => {
                let observed = match health {
                    Some(health) => format!("{} / {}", status, health),
                    None => status.clone(),
                };
                format!(
                    "  {} {} {}",
                    Icon::Pending.colored(color, unicode),
                    ColoredText::dim(format!("[{}/{}]", attempt, max_attempts)).render(color),
                    observed
                )
            }
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.render(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.ui.verbose > 0
    }
}
