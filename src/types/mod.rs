// ABOUTME: Validated newtype wrappers for Azure identifiers.
// ABOUTME: Prevents mixing up app names, resource groups, and deployment names.

mod app_name;
mod deployment_name;
mod image_ref;
mod resource_group;

pub use app_name::{AppName, AppNameError};
pub use deployment_name::DeploymentName;
pub use image_ref::{ImageRef, ParseImageRefError};
pub use resource_group::{ResourceGroupName, ResourceGroupNameError};
