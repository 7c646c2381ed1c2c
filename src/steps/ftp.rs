// ABOUTME: FTP deployment step for Java runtime targets.
// ABOUTME: Uploads the source tree to the profile's FTP endpoint.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::DeployStep;
use crate::chain::{DeploymentContext, StepKind, StepOutcome};
use crate::transport::FtpTransport;

pub struct FtpDeployStep {
    transport: Arc<dyn FtpTransport>,
}

impl FtpDeployStep {
    pub fn new(transport: Arc<dyn FtpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl DeployStep for FtpDeployStep {
    fn kind(&self) -> StepKind {
        StepKind::FtpDeploy
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let config = ctx.config();
        let profile = ctx.publishing_profile();
        let source = Path::new(&config.source_directory);

        match self
            .transport
            .upload_tree(profile, source, &config.target_directory)
            .await
        {
            Ok(uploaded) => {
                tracing::info!(files = uploaded, "FTP deployment complete");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!("FTP deployment failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}
