// ABOUTME: Bollard-based Docker engine implementation.
// ABOUTME: Packs the build context as a tar stream for the daemon.

use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{BuildImageOptions, PushImageOptions, RemoveImageOptions};
use futures::StreamExt;
use std::path::Path;

use super::{DockerEngine, EngineError, RegistryAuth};
use crate::types::ImageRef;

fn map_remove_error(e: bollard::errors::Error, image_name: &str) -> EngineError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            EngineError::NotFound(image_name.to_string())
        }
        _ => EngineError::Runtime(format!("failed to remove {}: {}", image_name, e)),
    }
}

/// Docker engine implementation using bollard against the local daemon.
pub struct BollardEngine {
    client: Docker,
}

impl BollardEngine {
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect to the local daemon using the default socket.
    pub fn connect_local() -> Result<Self, EngineError> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Pack a build context directory into an uncompressed tar archive.
    fn pack_context(context: &Path) -> Result<Vec<u8>, EngineError> {
        let mut builder = tar::Builder::new(Vec::new());
        builder.append_dir_all(".", context)?;
        builder.into_inner().map_err(EngineError::from)
    }

    fn credentials(auth: Option<&RegistryAuth>) -> Option<bollard::auth::DockerCredentials> {
        auth.map(|a| bollard::auth::DockerCredentials {
            username: Some(a.username.clone()),
            password: Some(a.password.clone()),
            serveraddress: a.server.clone(),
            ..Default::default()
        })
    }
}

#[async_trait]
impl DockerEngine for BollardEngine {
    async fn build_image(
        &self,
        context: &Path,
        dockerfile: &str,
        tag: &ImageRef,
    ) -> Result<(), EngineError> {
        let archive = Self::pack_context(context)?;

        let opts = BuildImageOptions {
            dockerfile: dockerfile.to_string(),
            t: Some(tag.to_string()),
            rm: true,
            ..Default::default()
        };

        let body = bollard::body_full(bytes::Bytes::from(archive));
        let mut stream = self.client.build_image(opts, None, Some(body));

        // Build progress arrives as a stream; an error record aborts the build.
        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| EngineError::BuildFailed(e.to_string()))?;
            if let Some(error) = info.error {
                return Err(EngineError::BuildFailed(error));
            }
            if let Some(progress) = info.stream {
                let progress = progress.trim_end();
                if !progress.is_empty() {
                    tracing::debug!(target: "docker-build", "{progress}");
                }
            }
        }

        Ok(())
    }

    async fn push_image(
        &self,
        image: &ImageRef,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), EngineError> {
        let opts = PushImageOptions {
            tag: Some(image.tag().to_string()),
            ..Default::default()
        };

        let mut stream = self.client.push_image(
            &image.repository(),
            Some(opts),
            Self::credentials(auth),
        );

        while let Some(item) = stream.next().await {
            let info = item.map_err(|e| EngineError::PushFailed(e.to_string()))?;
            if let Some(error) = info.error {
                return Err(EngineError::PushFailed(error));
            }
        }

        Ok(())
    }

    async fn remove_image(&self, image: &ImageRef, force: bool) -> Result<(), EngineError> {
        let image_name = image.to_string();

        let opts = RemoveImageOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_image(&image_name, Some(opts), None)
            .await
            .map_err(|e| map_remove_error(e, &image_name))?;

        Ok(())
    }
}
