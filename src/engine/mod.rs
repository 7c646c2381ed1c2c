// ABOUTME: Docker engine seam for image build, push, and removal.
// ABOUTME: The bollard implementation talks to a local daemon socket.

mod bollard;

pub use bollard::BollardEngine;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::types::ImageRef;

/// Registry credentials for pushing images.
#[derive(Debug, Clone)]
pub struct RegistryAuth {
    pub username: String,
    pub password: String,
    pub server: Option<String>,
}

/// Errors from Docker engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to connect to docker daemon: {0}")]
    ConnectionFailed(String),

    #[error("image build failed: {0}")]
    BuildFailed(String),

    #[error("image push failed: {0}")]
    PushFailed(String),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("engine error: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image operations needed by the Docker publish path.
#[async_trait]
pub trait DockerEngine: Send + Sync {
    /// Build an image from a context directory and tag it.
    async fn build_image(
        &self,
        context: &Path,
        dockerfile: &str,
        tag: &ImageRef,
    ) -> Result<(), EngineError>;

    /// Push a tagged image to its registry.
    async fn push_image(
        &self,
        image: &ImageRef,
        auth: Option<&RegistryAuth>,
    ) -> Result<(), EngineError>;

    /// Remove a local image.
    async fn remove_image(&self, image: &ImageRef, force: bool) -> Result<(), EngineError>;
}
