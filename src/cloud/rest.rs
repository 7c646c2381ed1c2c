// ABOUTME: Azure Resource Manager REST client backed by reqwest.
// ABOUTME: Thin seam implementation; auth is a pre-acquired bearer token.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use snafu::ResultExt;

use super::error::{ApiSnafu, CloudError, TransportSnafu};
use super::resources::{DeploymentOperation, DeploymentRequest, ResourceOps};
use super::web_app::{PublishingProfile, RuntimeStack, WebApp, WebAppOps};
use crate::error::{Error, Result};
use crate::types::{AppName, DeploymentName, ImageRef, ResourceGroupName};

const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
const WEB_API_VERSION: &str = "2023-12-01";
const RESOURCES_API_VERSION: &str = "2021-04-01";

/// ARM REST client.
///
/// Token acquisition is out of scope; the caller supplies a bearer token that
/// is valid for the management endpoint (`AZURE_ACCESS_TOKEN` in the CLI).
pub struct AzureClient {
    http: reqwest::Client,
    endpoint: String,
    subscription: String,
    token: String,
}

impl AzureClient {
    pub fn new(subscription: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription: subscription.into(),
            token: token.into(),
        }
    }

    /// Build a client from the `AZURE_ACCESS_TOKEN` environment variable.
    pub fn from_env(subscription: &str) -> Result<Self> {
        let token = std::env::var("AZURE_ACCESS_TOKEN")
            .map_err(|_| Error::MissingEnvVar("AZURE_ACCESS_TOKEN".to_string()))?;
        Ok(Self::new(subscription, token))
    }

    /// Override the management endpoint, e.g. for sovereign clouds or tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn site_path(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: Option<&str>,
    ) -> String {
        let base = format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/sites/{}",
            self.endpoint, self.subscription, resource_group, app
        );
        match slot {
            Some(slot) => format!("{}/slots/{}", base, slot),
            None => base,
        }
    }

    fn deployment_path(&self, resource_group: &ResourceGroupName, name: &DeploymentName) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Resources/deployments/{}",
            self.endpoint, self.subscription, resource_group, name
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> std::result::Result<reqwest::Response, CloudError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ApiSnafu {
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<T, CloudError> {
        let response = self.send(request).await?;
        response.json().await.context(TransportSnafu)
    }

    async fn publishing_credentials(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: Option<&str>,
    ) -> std::result::Result<PublishingProfile, CloudError> {
        let url = format!(
            "{}/config/publishingcredentials/list?api-version={}",
            self.site_path(resource_group, app, slot),
            WEB_API_VERSION
        );
        let credentials: PublishingCredentials = self.send_json(self.http.post(&url)).await?;

        Ok(PublishingProfile {
            ftp_url: credentials.properties.ftp_url.unwrap_or_default(),
            git_url: credentials.properties.scm_uri,
            username: credentials.properties.publishing_user_name,
            password: credentials.properties.publishing_password,
        })
    }
}

#[async_trait]
impl WebAppOps for AzureClient {
    async fn get_web_app(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
    ) -> std::result::Result<WebApp, CloudError> {
        let url = format!(
            "{}/config/web?api-version={}",
            self.site_path(resource_group, app, None),
            WEB_API_VERSION
        );
        let config: SiteConfigResource = self.send_json(self.http.get(&url)).await?;

        let runtime = match config.properties.java_version {
            Some(version) if !version.is_empty() => RuntimeStack::Java { version },
            _ => RuntimeStack::Other(
                config
                    .properties
                    .linux_fx_version
                    .unwrap_or_default(),
            ),
        };

        Ok(WebApp {
            name: app.clone(),
            runtime,
        })
    }

    async fn get_publishing_profile(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
    ) -> std::result::Result<PublishingProfile, CloudError> {
        self.publishing_credentials(resource_group, app, None).await
    }

    async fn get_slot_publishing_profile(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: &str,
    ) -> std::result::Result<Option<PublishingProfile>, CloudError> {
        // Probe the slot resource first so an absent slot maps to None
        // instead of a generic API error from the credentials call.
        let url = format!(
            "{}?api-version={}",
            self.site_path(resource_group, app, Some(slot)),
            WEB_API_VERSION
        );
        match self.send(self.http.get(&url)).await {
            Ok(_) => {}
            Err(e) if e.status() == Some(404) => return Ok(None),
            Err(e) => return Err(e),
        }

        self.publishing_credentials(resource_group, app, Some(slot))
            .await
            .map(Some)
    }

    async fn update_container_image(
        &self,
        resource_group: &ResourceGroupName,
        app: &AppName,
        slot: Option<&str>,
        image: &ImageRef,
    ) -> std::result::Result<(), CloudError> {
        let url = format!(
            "{}/config/web?api-version={}",
            self.site_path(resource_group, app, slot),
            WEB_API_VERSION
        );
        let body = json!({
            "properties": {
                "linuxFxVersion": format!("DOCKER|{}", image),
            }
        });

        self.send(self.http.patch(&url).json(&body)).await?;
        Ok(())
    }

    async fn check_name_availability(
        &self,
        name: &AppName,
    ) -> std::result::Result<bool, CloudError> {
        let url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Web/checknameavailability?api-version={}",
            self.endpoint, self.subscription, WEB_API_VERSION
        );
        let body = json!({
            "name": name.as_str(),
            "type": "Microsoft.Web/sites",
        });

        let availability: NameAvailability =
            self.send_json(self.http.post(&url).json(&body)).await?;
        Ok(availability.name_available)
    }
}

#[async_trait]
impl ResourceOps for AzureClient {
    async fn create_deployment(
        &self,
        resource_group: &ResourceGroupName,
        name: &DeploymentName,
        request: &DeploymentRequest,
    ) -> std::result::Result<(), CloudError> {
        let url = format!(
            "{}?api-version={}",
            self.deployment_path(resource_group, name),
            RESOURCES_API_VERSION
        );
        let body = json!({
            "properties": {
                "mode": request.mode,
                "template": request.template,
            }
        });

        self.send(self.http.put(&url).json(&body)).await?;
        Ok(())
    }

    async fn list_deployment_operations(
        &self,
        resource_group: &ResourceGroupName,
        name: &DeploymentName,
    ) -> std::result::Result<Vec<DeploymentOperation>, CloudError> {
        let url = format!(
            "{}/operations?api-version={}",
            self.deployment_path(resource_group, name),
            RESOURCES_API_VERSION
        );
        let page: OperationsPage = self.send_json(self.http.get(&url)).await?;

        // Bookkeeping operations (e.g. EvaluateDeploymentOutput) carry no
        // target resource and are not tracked by the monitor.
        Ok(page
            .value
            .into_iter()
            .filter_map(|op| {
                let target = op.properties.target_resource?;
                Some(DeploymentOperation {
                    resource_name: target.resource_name,
                    resource_type: target.resource_type,
                    provisioning_state: op.properties.provisioning_state,
                })
            })
            .collect())
    }
}

// =============================================================================
// Response Shapes
// =============================================================================

#[derive(Deserialize)]
struct SiteConfigResource {
    properties: SiteConfigProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfigProperties {
    #[serde(default)]
    java_version: Option<String>,
    #[serde(default)]
    linux_fx_version: Option<String>,
}

#[derive(Deserialize)]
struct PublishingCredentials {
    properties: PublishingCredentialsProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishingCredentialsProperties {
    publishing_user_name: String,
    publishing_password: String,
    scm_uri: String,
    #[serde(default)]
    ftp_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NameAvailability {
    name_available: bool,
}

#[derive(Deserialize)]
struct OperationsPage {
    #[serde(default)]
    value: Vec<OperationResource>,
}

#[derive(Deserialize)]
struct OperationResource {
    properties: OperationProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationProperties {
    provisioning_state: super::resources::ProvisioningState,
    #[serde(default)]
    target_resource: Option<TargetResource>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetResource {
    resource_name: String,
    resource_type: String,
}
