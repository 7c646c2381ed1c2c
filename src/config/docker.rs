// ABOUTME: Docker build settings for the container publish path.
// ABOUTME: Image reference, build context, and temp-image cleanup flag.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

use crate::types::ImageRef;

#[derive(Debug, Clone, Deserialize)]
pub struct DockerBuildConfig {
    #[serde(deserialize_with = "deserialize_image_ref")]
    pub image: ImageRef,

    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    #[serde(default = "default_context")]
    pub context: PathBuf,

    /// Registry the image is pushed to; defaults to the image's own registry.
    #[serde(default)]
    pub registry: Option<String>,

    /// Remove the locally built image after a successful deploy.
    #[serde(default)]
    pub delete_temp_image: bool,
}

fn default_dockerfile() -> String {
    "Dockerfile".to_string()
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}

fn deserialize_image_ref<'de, D>(deserializer: D) -> Result<ImageRef, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    ImageRef::parse(&value).map_err(serde::de::Error::custom)
}
