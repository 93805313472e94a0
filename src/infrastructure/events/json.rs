//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.
//! Every record carries `event`, `command` and an RFC 3339 `ts` field.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::error::DeployError;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Final record of a failed run
    pub fn on_error(&self, error: &DeployError) {
        self.write_event(error_json(error));
    }

    /// Arbitrary record (configuration warnings, cleanup notices)
    pub fn emit(&self, event: serde_json::Value) {
        self.write_event(event);
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert(
                "ts".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON body of a deploy event (without timestamp)
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            application,
            environment,
            version_label,
            region,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "application": application,
            "environment": environment,
            "version_label": version_label,
            "region": region,
        }),

        DeployEvent::StepStarted { step } => serde_json::json!({
            "event": "step_start",
            "command": "deploy",
            "step": step.as_str(),
        }),

        DeployEvent::ResourceFound { kind, id } => serde_json::json!({
            "event": "resource_found",
            "command": "deploy",
            "kind": kind.as_str(),
            "id": id,
        }),

        DeployEvent::ResourceCreated { kind, id } => serde_json::json!({
            "event": "resource_created",
            "command": "deploy",
            "kind": kind.as_str(),
            "id": id,
        }),

        DeployEvent::Warning { message } => serde_json::json!({
            "event": "warning",
            "command": "deploy",
            "message": message,
        }),

        DeployEvent::Waiting { reason, seconds } => serde_json::json!({
            "event": "waiting",
            "command": "deploy",
            "reason": reason,
            "seconds": seconds,
        }),

        DeployEvent::Polled {
            attempt,
            max_attempts,
            status,
            health,
        } => serde_json::json!({
            "event": "poll",
            "command": "deploy",
            "attempt": attempt,
            "max_attempts": max_attempts,
            "status": status,
            "health": health,
        }),

        DeployEvent::StepCompleted { step } => serde_json::json!({
            "event": "step_complete",
            "command": "deploy",
            "step": step.as_str(),
        }),

        DeployEvent::Completed {
            environment,
            action,
            attempts,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": "success",
            "environment": environment,
            "action": action,
            "attempts": attempts,
        }),
    }
}

/// JSON body of the final error record (without timestamp)
pub fn error_json(error: &DeployError) -> serde_json::Value {
    let events: Vec<serde_json::Value> = error
        .events()
        .iter()
        .map(|e| {
            serde_json::json!({
                "timestamp": e.timestamp,
                "severity": e.severity,
                "message": e.message,
            })
        })
        .collect();
    serde_json::json!({
        "event": "error",
        "command": "deploy",
        "status": "failed",
        "message": error.to_string(),
        "events": events,
    })
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EnvironmentEvent;
    use crate::domain::ports::{DeployStep, ResourceKind};
    use insta::assert_snapshot;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_sink_writes_one_timestamped_line_per_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::StepStarted {
            step: DeployStep::Network,
        });
        sink.on_event(DeployEvent::StepCompleted {
            step: DeployStep::Network,
        });

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "step_start");
        assert!(first["ts"].as_str().is_some());
    }

    #[test]
    fn start_event_shape() {
        let json = event_json(&DeployEvent::Started {
            application: "shop".to_string(),
            environment: "shop-prod".to_string(),
            version_label: "v1".to_string(),
            region: "eu-west-1".to_string(),
        });
        assert_snapshot!(json.to_string(), @r#"{"application":"shop","command":"deploy","environment":"shop-prod","event":"start","region":"eu-west-1","version_label":"v1"}"#);
    }

    #[test]
    fn resource_created_event_shape() {
        let json = event_json(&DeployEvent::ResourceCreated {
            kind: ResourceKind::InternetGateway,
            id: "igw-0abc".to_string(),
        });
        assert_snapshot!(json.to_string(), @r#"{"command":"deploy","event":"resource_created","id":"igw-0abc","kind":"internet_gateway"}"#);
    }

    #[test]
    fn poll_event_shape() {
        let json = event_json(&DeployEvent::Polled {
            attempt: 3,
            max_attempts: 30,
            status: "Launching".to_string(),
            health: None,
        });
        assert_snapshot!(json.to_string(), @r#"{"attempt":3,"command":"deploy","event":"poll","health":null,"max_attempts":30,"status":"Launching"}"#);
    }

    #[test]
    fn error_record_carries_events() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_error(&DeployError::EnvironmentFailed {
            environment: "shop-prod".to_string(),
            status: "Failed".to_string(),
            health: "Red".to_string(),
            events: vec![EnvironmentEvent {
                timestamp: "2026-10-19T08:00:00Z".to_string(),
                severity: "ERROR".to_string(),
                message: "Stack creation failed".to_string(),
            }],
        });

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        let record: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(record["event"], "error");
        assert_eq!(record["status"], "failed");
        assert_eq!(record["events"][0]["message"], "Stack creation failed");
    }
}
