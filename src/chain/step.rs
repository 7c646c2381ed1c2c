// ABOUTME: Step identities and outcome types for the deployment chain.
// ABOUTME: Steps are a closed enum; transitions are keyed by these variants.

use std::fmt;

/// Identity of one unit of work in the deployment chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    DockerBuild,
    DockerPush,
    DockerDeploy,
    RemoveTempImage,
    FtpDeploy,
    GitDeploy,
}

impl StepKind {
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::DockerBuild => "docker-build",
            StepKind::DockerPush => "docker-push",
            StepKind::DockerDeploy => "docker-deploy",
            StepKind::RemoveTempImage => "remove-temp-image",
            StepKind::FtpDeploy => "ftp-deploy",
            StepKind::GitDeploy => "git-deploy",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result reported by one step execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failure,
    /// The step could not determine its own result; the chain treats this
    /// as a failure with no failure target.
    Unknown,
}

/// Overall state of a chain in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Running,
    Succeeded,
    Failed,
}
