//! AWS CLI Runner
//!
//! Every provider call is one `aws <service> <operation> ...` invocation with
//! `--region` and `--output json`. Stdout is parsed as JSON; a non-zero exit
//! becomes `ProviderError::CommandFailed` carrying the tool's stderr.

use std::io;
use std::process::{Command, Output, Stdio};

use serde::de::DeserializeOwned;

use crate::domain::ports::{ProviderError, ProviderResult};

/// Runs the `aws` command-line tool against one region
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    region: String,
}

impl AwsCli {
    pub const PROGRAM: &'static str = "aws";

    pub fn new(region: impl Into<String>) -> Self {
        Self::with_program(Self::PROGRAM, region)
    }

    /// Use a different executable (tests point this at a stub script)
    pub fn with_program(program: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Run an operation whose output is not needed
    pub fn exec(&self, service: &str, operation: &str, args: &[&str]) -> ProviderResult<()> {
        self.run(service, operation, args).map(|_| ())
    }

    /// Run an operation and deserialize its JSON output
    pub fn json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        args: &[&str],
    ) -> ProviderResult<T> {
        let stdout = self.run(service, operation, args)?;
        parse_output(&label(service, operation), &stdout)
    }

    /// Like `json`, but a failure whose stderr contains one of `missing`
    /// markers means "no such resource"
    pub fn json_or_missing<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        args: &[&str],
        missing: &[&str],
    ) -> ProviderResult<Option<T>> {
        match self.run_or_missing(service, operation, args, missing)? {
            Some(stdout) => parse_output(&label(service, operation), &stdout).map(Some),
            None => Ok(None),
        }
    }

    /// Run an operation, mapping "not found" failures to `None`
    pub fn run_or_missing(
        &self,
        service: &str,
        operation: &str,
        args: &[&str],
        missing: &[&str],
    ) -> ProviderResult<Option<String>> {
        match self.run(service, operation, args) {
            Ok(stdout) => Ok(Some(stdout)),
            Err(ProviderError::CommandFailed { message, .. })
                if missing.iter().any(|marker| message.contains(marker)) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Run an operation and return its stdout
    pub fn run(&self, service: &str, operation: &str, args: &[&str]) -> ProviderResult<String> {
        let output = self
            .command(service, operation, args)
            .output()
            .map_err(|e| self.spawn_error(service, operation, e))?;
        check_output(&label(service, operation), output)
    }

    fn command(&self, service: &str, operation: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(service)
            .arg(operation)
            .args(args)
            .arg("--region")
            .arg(&self.region)
            .arg("--output")
            .arg("json")
            .env("AWS_PAGER", "")
            .stdin(Stdio::null());
        cmd
    }

    fn spawn_error(&self, service: &str, operation: &str, e: io::Error) -> ProviderError {
        if e.kind() == io::ErrorKind::NotFound {
            ProviderError::Unavailable(format!(
                "'{}' is not installed or not on PATH",
                self.program
            ))
        } else {
            ProviderError::failed(label(service, operation), e.to_string())
        }
    }
}

fn label(service: &str, operation: &str) -> String {
    format!("{} {}", service, operation)
}

fn check_output(operation: &str, output: Output) -> ProviderResult<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match stderr.trim() {
        "" => match output.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        },
        text => text.to_string(),
    };
    Err(ProviderError::failed(operation, message))
}

/// Deserialize tool output; empty output reads as JSON `null`
pub(crate) fn parse_output<T: DeserializeOwned>(operation: &str, stdout: &str) -> ProviderResult<T> {
    let text = match stdout.trim() {
        "" => "null",
        text => text,
    };
    serde_json::from_str(text).map_err(|e| ProviderError::malformed(operation, e.to_string()))
}
