// ABOUTME: ARM deployment submission.
// ABOUTME: Loads a template, lets the caller inject parameters, submits incrementally.

use serde_json::Value;

use super::template::EmbeddedTemplate;
use crate::cloud::{DeploymentMode, DeploymentRequest, ResourceOps};
use crate::error::{Error, Result};
use crate::types::{DeploymentName, ResourceGroupName};

/// Submit an embedded template as an incremental resource-group deployment.
///
/// The caller's `configure` callback mutates the parsed template in place,
/// typically through [`set_parameter`](super::set_parameter). Returns the
/// generated deployment name the monitor uses to find the deployment again.
///
/// # Errors
///
/// A blank resource group name fails with `Error::InvalidArgument`; any
/// template-load, serialization, or submission failure surfaces through the
/// usual error conversions.
pub async fn submit_deployment<C, F>(
    client: &C,
    resource_group: &str,
    template: EmbeddedTemplate,
    configure: F,
) -> Result<DeploymentName>
where
    C: ResourceOps + ?Sized,
    F: FnOnce(&mut Value) -> Result<()>,
{
    let resource_group = ResourceGroupName::new(resource_group)
        .map_err(|_| Error::InvalidArgument("resource group name is required"))?;

    let mut document = template.load()?;
    configure(&mut document)?;

    let name = DeploymentName::generate();
    let request = DeploymentRequest {
        mode: DeploymentMode::Incremental,
        template: document,
    };

    client
        .create_deployment(&resource_group, &name, &request)
        .await?;

    tracing::info!(deployment = %name, resource_group = %resource_group, "deployment submitted");

    Ok(name)
}
