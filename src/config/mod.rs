// ABOUTME: Configuration types and parsing for skafos.yml.
// ABOUTME: Handles YAML parsing, validated newtypes, and publish-type selection.

mod docker;
mod init;

pub use docker::DockerBuildConfig;
pub use init::init_config;

use crate::arm::DEFAULT_POLL_INTERVAL;
use crate::error::{Error, Result};
use crate::types::{AppName, ResourceGroupName};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "skafos.yml";
pub const CONFIG_FILENAME_ALT: &str = "skafos.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".skafos/config.yml";

/// Publish type value that selects the Docker deployment chain.
pub const PUBLISH_TYPE_DOCKER: &str = "docker";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_app_name")]
    pub app: AppName,

    #[serde(deserialize_with = "deserialize_resource_group")]
    pub resource_group: ResourceGroupName,

    #[serde(default)]
    pub subscription: Option<String>,

    /// Publish type; "docker" (any case) selects the Docker chain.
    #[serde(default)]
    pub publish: Option<String>,

    #[serde(default)]
    pub source_directory: String,

    #[serde(default)]
    pub target_directory: String,

    /// Named deployment slot; the default (production) target when unset.
    #[serde(default)]
    pub slot: Option<String>,

    #[serde(default)]
    pub docker: Option<DockerBuildConfig>,

    /// Reference to the credential used to authenticate against Azure.
    #[serde(default)]
    pub credential: Option<String>,

    /// How often the ARM monitor polls deployment operations.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// The publish type, trimmed, with blank treated as unset.
    pub fn publish_type(&self) -> Option<&str> {
        self.publish
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// The slot name, trimmed, with blank treated as unset.
    pub fn slot_name(&self) -> Option<&str> {
        self.slot
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether the temporary image is removed after a Docker deploy.
    pub fn delete_temp_image(&self) -> bool {
        self.docker
            .as_ref()
            .map(|d| d.delete_temp_image)
            .unwrap_or(false)
    }

    pub fn template() -> Self {
        Config {
            app: AppName::new("my-app").unwrap(),
            resource_group: ResourceGroupName::new("my-resource-group").unwrap(),
            subscription: None,
            publish: None,
            source_directory: String::new(),
            target_directory: String::new(),
            slot: None,
            docker: None,
            credential: None,
            poll_interval: default_poll_interval(),
        }
    }
}

fn deserialize_app_name<'de, D>(deserializer: D) -> std::result::Result<AppName, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    AppName::new(&value).map_err(serde::de::Error::custom)
}

fn deserialize_resource_group<'de, D>(
    deserializer: D,
) -> std::result::Result<ResourceGroupName, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    ResourceGroupName::new(&value).map_err(serde::de::Error::custom)
}
