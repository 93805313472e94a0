//! Observed environment state
//!
//! The platform owns the environment lifecycle; we only read its status and
//! health and classify them.

use std::fmt;

/// Lifecycle status reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvironmentStatus {
    Launching,
    Updating,
    Ready,
    Terminating,
    Terminated,
    Failed,
    /// Any status we do not classify (kept verbatim for reporting)
    Other(String),
}

impl EnvironmentStatus {
    /// Parse a status string as reported by the provider
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Launching" => Self::Launching,
            "Updating" => Self::Updating,
            "Ready" => Self::Ready,
            "Terminating" => Self::Terminating,
            "Terminated" => Self::Terminated,
            "Failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Launching => "Launching",
            Self::Updating => "Updating",
            Self::Ready => "Ready",
            Self::Terminating => "Terminating",
            Self::Terminated => "Terminated",
            Self::Failed => "Failed",
            Self::Other(s) => s,
        }
    }

    /// Everything except the terminal statuses, unrecognised ones included
    pub fn is_live(&self) -> bool {
        !matches!(self, Self::Terminated | Self::Failed)
    }

    /// Statuses from which the environment can never become ready
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Failed | Self::Terminating | Self::Terminated)
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational health reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvironmentHealth {
    Green,
    Yellow,
    Red,
    Grey,
    Other(String),
}

impl EnvironmentHealth {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "Green" => Self::Green,
            "Yellow" => Self::Yellow,
            "Red" => Self::Red,
            "Grey" => Self::Grey,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Grey => "Grey",
            Self::Other(s) => s,
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Green)
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Red)
    }
}

impl fmt::Display for EnvironmentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the named environment exists, derived from its observed status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentPresence {
    NotExists,
    Exists(EnvironmentStatus),
}

impl EnvironmentPresence {
    /// Classify an observed status (`None` = the provider knows no such environment)
    pub fn from_status(status: Option<EnvironmentStatus>) -> Self {
        match status {
            Some(status) if status.is_live() => Self::Exists(status),
            _ => Self::NotExists,
        }
    }
}

/// A recent provider event, fetched for operator triage on failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEvent {
    pub timestamp: String,
    pub severity: String,
    pub message: String,
}

impl fmt::Display for EnvironmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.timestamp, self.severity, self.message)
    }
}
