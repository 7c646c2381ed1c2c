// ABOUTME: ARM deployment name derived from submission time.
// ABOUTME: Epoch milliseconds as a decimal string, used to locate the deployment later.

use chrono::Utc;
use std::fmt;

/// Name of a submitted ARM deployment.
///
/// Generated from the current time in epoch milliseconds. Unique enough for
/// the monitor to find the deployment again; collisions are not structurally
/// prevented at expected call rates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentName(String);

impl DeploymentName {
    pub fn generate() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }

    /// Wrap an existing deployment name, e.g. one read back from the CLI.
    pub fn from_string(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
