// ABOUTME: Shared test support: mock cloud clients and recording sinks.
// ABOUTME: Used by chain, monitor, and template integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use skafos::arm::StatusSink;
use skafos::cloud::{
    CloudError, DeploymentOperation, DeploymentRequest, ProvisioningState, PublishingProfile,
    ResourceOps, RuntimeStack, WebApp, WebAppOps,
};
use skafos::types::{AppName, DeploymentName, ImageRef, ResourceGroupName};

pub fn profile(label: &str) -> PublishingProfile {
    PublishingProfile {
        ftp_url: format!("ftps://{label}.ftp.example.net/site/wwwroot"),
        git_url: format!("https://{label}.scm.example.net/app.git"),
        username: format!("${label}"),
        password: "secret".to_string(),
    }
}

pub fn op(name: &str, resource_type: &str, state: &str) -> DeploymentOperation {
    DeploymentOperation {
        resource_name: name.to_string(),
        resource_type: resource_type.to_string(),
        provisioning_state: ProvisioningState::parse(state),
    }
}

/// One monitor poll cycle's worth of canned responses.
pub enum PollBatch {
    Ops(Vec<DeploymentOperation>),
    FetchError,
}

/// In-memory cloud client with scripted responses.
pub struct MockCloud {
    pub runtime: RuntimeStack,
    pub slots: Vec<String>,
    pub fail_profile: bool,
    pub fail_availability: bool,
    pub availability_delay: Option<Duration>,
    pub updated_images: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<(String, String, serde_json::Value)>>,
    pub batches: Mutex<VecDeque<PollBatch>>,
}

impl MockCloud {
    pub fn new(runtime: RuntimeStack) -> Self {
        Self {
            runtime,
            slots: Vec::new(),
            fail_profile: false,
            fail_availability: false,
            availability_delay: None,
            updated_images: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            batches: Mutex::new(VecDeque::new()),
        }
    }

    pub fn java() -> Self {
        Self::new(RuntimeStack::Java {
            version: "17".to_string(),
        })
    }

    pub fn node() -> Self {
        Self::new(RuntimeStack::Other("NODE|20-lts".to_string()))
    }

    pub fn with_slots(mut self, slots: &[&str]) -> Self {
        self.slots = slots.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn push_batch(&self, batch: PollBatch) {
        self.batches.lock().unwrap().push_back(batch);
    }
}

fn api_error() -> CloudError {
    CloudError::Api {
        status: 500,
        body: "boom".to_string(),
    }
}

#[async_trait]
impl WebAppOps for MockCloud {
    async fn get_web_app(
        &self,
        _resource_group: &ResourceGroupName,
        app: &AppName,
    ) -> Result<WebApp, CloudError> {
        Ok(WebApp {
            name: app.clone(),
            runtime: self.runtime.clone(),
        })
    }

    async fn get_publishing_profile(
        &self,
        _resource_group: &ResourceGroupName,
        _app: &AppName,
    ) -> Result<PublishingProfile, CloudError> {
        if self.fail_profile {
            return Err(api_error());
        }
        Ok(profile("production"))
    }

    async fn get_slot_publishing_profile(
        &self,
        _resource_group: &ResourceGroupName,
        _app: &AppName,
        slot: &str,
    ) -> Result<Option<PublishingProfile>, CloudError> {
        if self.fail_profile {
            return Err(api_error());
        }
        if self.slots.iter().any(|s| s == slot) {
            Ok(Some(profile(slot)))
        } else {
            Ok(None)
        }
    }

    async fn update_container_image(
        &self,
        _resource_group: &ResourceGroupName,
        _app: &AppName,
        _slot: Option<&str>,
        image: &ImageRef,
    ) -> Result<(), CloudError> {
        self.updated_images.lock().unwrap().push(image.to_string());
        Ok(())
    }

    async fn check_name_availability(&self, _name: &AppName) -> Result<bool, CloudError> {
        if let Some(delay) = self.availability_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_availability {
            return Err(api_error());
        }
        Ok(true)
    }
}

#[async_trait]
impl ResourceOps for MockCloud {
    async fn create_deployment(
        &self,
        resource_group: &ResourceGroupName,
        name: &DeploymentName,
        request: &DeploymentRequest,
    ) -> Result<(), CloudError> {
        self.submitted.lock().unwrap().push((
            resource_group.to_string(),
            name.to_string(),
            request.template.clone(),
        ));
        Ok(())
    }

    async fn list_deployment_operations(
        &self,
        _resource_group: &ResourceGroupName,
        _name: &DeploymentName,
    ) -> Result<Vec<DeploymentOperation>, CloudError> {
        match self.batches.lock().unwrap().pop_front() {
            Some(PollBatch::Ops(ops)) => Ok(ops),
            Some(PollBatch::FetchError) => Err(api_error()),
            None => Ok(Vec::new()),
        }
    }
}

/// Captures monitor status and error messages for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub statuses: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl StatusSink for RecordingSink {
    fn status(&self, message: &str) {
        self.statuses.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
