// ABOUTME: Deployment step trait and the executor that dispatches by step kind.
// ABOUTME: Steps consume the context and report success, failure, or unknown.

mod docker;
mod ftp;
mod git;

pub use docker::{DockerBuildStep, DockerDeployStep, DockerPushStep, RemoveImageStep};
pub use ftp::FtpDeployStep;
pub use git::GitDeployStep;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::chain::{DeploymentContext, StepKind, StepOutcome};

/// A named unit of work in the deployment chain.
#[async_trait]
pub trait DeployStep: Send + Sync {
    fn kind(&self) -> StepKind;

    /// Execute the step against the configured context.
    ///
    /// Steps log their own errors and fold them into the outcome; the chain
    /// only sees success, failure, or unknown.
    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome;
}

/// Registry of step implementations, keyed by step kind.
#[derive(Default)]
pub struct StepExecutor {
    steps: HashMap<StepKind, Box<dyn DeployStep>>,
}

impl StepExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, step: Box<dyn DeployStep>) -> Self {
        self.steps.insert(step.kind(), step);
        self
    }

    /// Run the registered implementation for a step kind.
    ///
    /// A kind with no registered implementation reports `Unknown`, which
    /// terminates the chain as failed.
    pub async fn run(&self, kind: StepKind, ctx: &DeploymentContext) -> StepOutcome {
        match self.steps.get(&kind) {
            Some(step) => step.run(ctx).await,
            None => {
                tracing::error!(step = %kind, "no implementation registered for step");
                StepOutcome::Unknown
            }
        }
    }
}
