// ABOUTME: Cloud client seams for Azure web apps and resource deployments.
// ABOUTME: Traits keep the SDK surface mockable; the REST client implements them.

mod error;
mod resources;
mod rest;
mod verify;
mod web_app;

pub use error::{CloudError, CloudErrorKind};
pub use resources::{
    DeploymentMode, DeploymentOperation, DeploymentRequest, ProvisioningState, ResourceOps,
};
pub use rest::AzureClient;
pub use verify::verify_configuration;
pub use web_app::{PublishingProfile, RuntimeStack, WebApp, WebAppOps};
