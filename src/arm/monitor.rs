// ABOUTME: ARM deployment monitor: a polling state machine over async operations.
// ABOUTME: Fail-fast on any resource failure; a failed fetch is terminal.

use std::time::Duration;
use thiserror::Error;

use crate::cloud::{CloudError, ProvisioningState, ResourceOps};
use crate::types::{DeploymentName, ResourceGroupName};

/// Fixed interval trades responsiveness for ARM rate-limit safety.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Where the monitor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No poll has happened yet.
    Pending,
    /// At least one poll cycle has run; outstanding operations remain.
    Polling,
    Succeeded,
    Failed,
}

/// Errors that end monitoring.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The operation-list fetch failed; not retried.
    #[error("failed to fetch deployment operations: {0}")]
    OperationFetch(#[source] CloudError),

    /// One resource reached Failed or Canceled.
    #[error("provisioning failed ({state}): {resource_type}:{resource_name}")]
    ResourceFailed {
        state: String,
        resource_type: String,
        resource_name: String,
    },
}

/// Per-resource progress sink supplied by the caller.
///
/// Two severities: informational progress and hard failure.
pub trait StatusSink {
    fn status(&self, message: &str);
    fn error(&self, message: &str);
}

/// Polls a submitted deployment until every resource operation settles.
pub struct DeploymentMonitor {
    interval: Duration,
    state: PollState,
}

impl DeploymentMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PollState::Pending,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Block until the deployment settles.
    ///
    /// Each cycle sleeps the poll interval, fetches the full operation list,
    /// and walks it: the first `Failed` or `Canceled` operation ends the
    /// monitor immediately without inspecting the rest of the batch; each
    /// `Succeeded` operation decrements the outstanding count; anything else
    /// stays outstanding. The cycle repeats until the count reaches zero.
    /// Counting down (rather than tracking a completion set) tolerates
    /// operations appearing or disappearing between polls.
    pub async fn run<C: ResourceOps + ?Sized>(
        &mut self,
        client: &C,
        resource_group: &ResourceGroupName,
        deployment: &DeploymentName,
        sink: &dyn StatusSink,
    ) -> Result<(), MonitorError> {
        loop {
            tokio::time::sleep(self.interval).await;
            self.state = PollState::Polling;

            let operations = match client
                .list_deployment_operations(resource_group, deployment)
                .await
            {
                Ok(operations) => operations,
                Err(e) => {
                    tracing::warn!(deployment = %deployment, "failed to fetch deployment operations: {e}");
                    sink.error(&format!("Failed getting deployment operations: {}", e));
                    self.state = PollState::Failed;
                    return Err(MonitorError::OperationFetch(e));
                }
            };

            let mut outstanding = operations.len();
            for op in &operations {
                let state = &op.provisioning_state;
                match state {
                    ProvisioningState::Failed | ProvisioningState::Canceled => {
                        sink.error(&format!(
                            "Failed({}): {}:{}",
                            state.as_str(),
                            op.resource_type,
                            op.resource_name
                        ));
                        self.state = PollState::Failed;
                        return Err(MonitorError::ResourceFailed {
                            state: state.as_str().to_string(),
                            resource_type: op.resource_type.clone(),
                            resource_name: op.resource_name.clone(),
                        });
                    }
                    ProvisioningState::Succeeded => {
                        sink.status(&format!(
                            "Succeeded({}): {}:{}",
                            state.as_str(),
                            op.resource_type,
                            op.resource_name
                        ));
                        outstanding -= 1;
                    }
                    ProvisioningState::Other(_) => {
                        sink.status(&format!(
                            "To be completed({}): {}:{}",
                            state.as_str(),
                            op.resource_type,
                            op.resource_name
                        ));
                    }
                }
            }

            if outstanding == 0 {
                self.state = PollState::Succeeded;
                return Ok(());
            }
        }
    }
}
