//! Role trust policy document

use serde::Serialize;

/// Trust policy allowing a single service principal to assume a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustPolicy {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Statement")]
    statement: Vec<TrustStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TrustStatement {
    #[serde(rename = "Effect")]
    effect: &'static str,
    #[serde(rename = "Principal")]
    principal: Principal,
    #[serde(rename = "Action")]
    action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Principal {
    #[serde(rename = "Service")]
    service: String,
}

impl TrustPolicy {
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            version: "2012-10-17",
            statement: vec![TrustStatement {
                effect: "Allow",
                principal: Principal {
                    service: service.into(),
                },
                action: "sts:AssumeRole",
            }],
        }
    }

    pub fn trusted_service(&self) -> &str {
        self.statement
            .first()
            .map(|s| s.principal.service.as_str())
            .unwrap_or_default()
    }
}
