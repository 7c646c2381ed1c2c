// ABOUTME: Docker publish path steps: build, push, deploy, remove temp image.
// ABOUTME: Build and push go through the engine; deploy updates the web app config.

use std::sync::Arc;

use async_trait::async_trait;

use super::DeployStep;
use crate::chain::{DeploymentContext, StepKind, StepOutcome};
use crate::cloud::WebAppOps;
use crate::config::DockerBuildConfig;
use crate::engine::{DockerEngine, RegistryAuth};

fn docker_config(ctx: &DeploymentContext) -> Option<&DockerBuildConfig> {
    let docker = ctx.config().docker.as_ref();
    if docker.is_none() {
        tracing::error!("docker publish type configured without a docker section");
    }
    docker
}

/// Build the container image from the configured context directory.
pub struct DockerBuildStep {
    engine: Arc<dyn DockerEngine>,
}

impl DockerBuildStep {
    pub fn new(engine: Arc<dyn DockerEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl DeployStep for DockerBuildStep {
    fn kind(&self) -> StepKind {
        StepKind::DockerBuild
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let Some(docker) = docker_config(ctx) else {
            return StepOutcome::Failure;
        };

        match self
            .engine
            .build_image(&docker.context, &docker.dockerfile, &docker.image)
            .await
        {
            Ok(()) => {
                tracing::info!(image = %docker.image, "image built");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!(image = %docker.image, "image build failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}

/// Push the built image to its registry.
pub struct DockerPushStep {
    engine: Arc<dyn DockerEngine>,
    auth: Option<RegistryAuth>,
}

impl DockerPushStep {
    pub fn new(engine: Arc<dyn DockerEngine>, auth: Option<RegistryAuth>) -> Self {
        Self { engine, auth }
    }
}

#[async_trait]
impl DeployStep for DockerPushStep {
    fn kind(&self) -> StepKind {
        StepKind::DockerPush
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let Some(docker) = docker_config(ctx) else {
            return StepOutcome::Failure;
        };

        match self
            .engine
            .push_image(&docker.image, self.auth.as_ref())
            .await
        {
            Ok(()) => {
                tracing::info!(image = %docker.image, "image pushed");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!(image = %docker.image, "image push failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}

/// Point the web app (or slot) at the pushed image.
pub struct DockerDeployStep {
    client: Arc<dyn WebAppOps>,
}

impl DockerDeployStep {
    pub fn new(client: Arc<dyn WebAppOps>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeployStep for DockerDeployStep {
    fn kind(&self) -> StepKind {
        StepKind::DockerDeploy
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let Some(docker) = docker_config(ctx) else {
            return StepOutcome::Failure;
        };
        let config = ctx.config();

        match self
            .client
            .update_container_image(
                &config.resource_group,
                &config.app,
                config.slot_name(),
                &docker.image,
            )
            .await
        {
            Ok(()) => {
                tracing::info!(app = %config.app, image = %docker.image, "container deployed");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!(app = %config.app, "container deploy failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}

/// Remove the locally built image once it has been deployed.
pub struct RemoveImageStep {
    engine: Arc<dyn DockerEngine>,
}

impl RemoveImageStep {
    pub fn new(engine: Arc<dyn DockerEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl DeployStep for RemoveImageStep {
    fn kind(&self) -> StepKind {
        StepKind::RemoveTempImage
    }

    async fn run(&self, ctx: &DeploymentContext) -> StepOutcome {
        let Some(docker) = docker_config(ctx) else {
            return StepOutcome::Failure;
        };

        match self.engine.remove_image(&docker.image, true).await {
            Ok(()) => {
                tracing::info!(image = %docker.image, "temp image removed");
                StepOutcome::Success
            }
            Err(e) => {
                tracing::error!(image = %docker.image, "temp image removal failed: {e}");
                StepOutcome::Failure
            }
        }
    }
}
