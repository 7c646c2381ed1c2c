// ABOUTME: Web app operations trait and descriptor types.
// ABOUTME: Publishing profiles, runtime stacks, and slot resolution.

use async_trait::async_trait;

use super::error::CloudError;
use crate::types::{AppName, ImageRef, ResourceGroupName};

/// Credentials and endpoints for pushing content into one app or slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishingProfile {
    pub ftp_url: String,
    pub git_url: String,
    pub username: String,
    pub password: String,
}

/// The runtime stack configured on a web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeStack {
    Java { version: String },
    Other(String),
}

impl RuntimeStack {
    pub fn is_java(&self) -> bool {
        matches!(self, RuntimeStack::Java { .. })
    }
}

/// Descriptor for an existing web app, fetched once per deployment.
#[derive(Debug, Clone)]
pub struct WebApp {
    pub name: AppName,
    pub runtime: RuntimeStack,
}

/// Web app operations: profile resolution, slot lookup, container updates.
#[async_trait]
pub trait WebAppOps: Send + Sync {
    /// Fetch the app descriptor, including its configured runtime stack.
    async fn get_web_app(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
    ) -> Result<WebApp, CloudError>;

    /// Publishing profile of the app's default (production) target.
    async fn get_publishing_profile(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
    ) -> Result<PublishingProfile, CloudError>;

    /// Publishing profile of a named deployment slot.
    ///
    /// Returns `None` if the slot does not exist on the app.
    async fn get_slot_publishing_profile(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: &str,
    ) -> Result<Option<PublishingProfile>, CloudError>;

    /// Point the app (or one of its slots) at a container image.
    async fn update_container_image(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: Option<&str>,
        image: &ImageRef,
    ) -> Result<(), CloudError>;

    /// Cheap authenticated round-trip used for configuration validation.
    async fn check_name_availability(&self, name: &AppName) -> Result<bool, CloudError>;
}
