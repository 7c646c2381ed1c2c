// ABOUTME: Git deployment step for non-Java targets.
// ABOUTME: Pushes the source tree to the profile's Git endpoint.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::DeployStep;
use crate::chain::{DeploymentContext, StepKind, StepOutcome};
use crate::transport::GitTransport;

pub struct GitDeployStep {
    transport: Arc<dyn GitTransport>,
}

impl GitDeployStep {
    pub fn new(transport: Arc<dyn GitTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeployStep for GitDeployStep {
    fn kind(&self) -> StepKind {
        StepKind::GitDeploy
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let config = ctx.config();
        let profile = ctx.publishing_profile();
        let source = Path::new(&config.source_directory);

        match self.transport.push_tree(profile, source).await {
            Ok(()) => {
                tracing::info!("Git deployment complete");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!("Git deployment failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}
