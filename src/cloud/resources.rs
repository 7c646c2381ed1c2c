// ABOUTME: Resource deployment operations trait and ARM data types.
// ABOUTME: Deployment submission plus per-resource provisioning records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::CloudError;
use crate::types::{DeploymentName, ResourceGroupName};

/// How ARM reconciles the template against the resource group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeploymentMode {
    Incremental,
    Complete,
}

/// A template deployment ready for submission.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRequest {
    pub mode: DeploymentMode,
    pub template: serde_json::Value,
}

/// Provisioning status of one resource operation within a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProvisioningState {
    Succeeded,
    Failed,
    Canceled,
    /// Any in-progress value (Running, Accepted, Creating, ...).
    Other(String),
}

impl ProvisioningState {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "succeeded" => ProvisioningState::Succeeded,
            "failed" => ProvisioningState::Failed,
            "canceled" | "cancelled" => ProvisioningState::Canceled,
            _ => ProvisioningState::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProvisioningState::Succeeded => "Succeeded",
            ProvisioningState::Failed => "Failed",
            ProvisioningState::Canceled => "Canceled",
            ProvisioningState::Other(value) => value,
        }
    }
}

impl From<String> for ProvisioningState {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// One resource's current provisioning record, fetched fresh on each poll.
#[derive(Debug, Clone)]
pub struct DeploymentOperation {
    pub resource_name: String,
    pub resource_type: String,
    pub provisioning_state: ProvisioningState,
}

/// Resource group deployment operations: submit and poll.
#[async_trait]
pub trait ResourceOps: Send + Sync {
    /// Submit a template deployment under the given name.
    async fn create_deployment(
        &self,
        resource_group: &ResourceGroupName,
        name: &DeploymentName,
        request: &DeploymentRequest,
    ) -> Result<(), CloudError>;

    /// Fetch the full current operation list for a deployment.
    async fn list_deployment_operations(
        &self,
        resource_group: &ResourceGroupName,
        name: &DeploymentName,
    ) -> Result<Vec<DeploymentOperation>, CloudError>;
}
