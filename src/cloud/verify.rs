// ABOUTME: Configuration validation against the cloud API.
// ABOUTME: A single bounded call; no executor, no retry.

use std::time::Duration;

use super::error::CloudError;
use super::web_app::WebAppOps;
use crate::types::AppName;

/// Verify that the configured credentials can reach the management API.
///
/// Issues one cheap authenticated call (a name-availability check) bounded by
/// an explicit timeout. Any failure means the subscription configuration is
/// unusable.
pub async fn verify_configuration<C: WebAppOps + ?Sized>(
    client: &C,
    app: &AppName,
    timeout: Duration,
) -> Result<(), CloudError> {
    match tokio::time::timeout(timeout, client.check_name_availability(app)).await {
        Ok(Ok(available)) => {
            tracing::debug!(app = %app, available, "configuration verified");
            Ok(())
        }
        Ok(Err(e)) => Err(e),
        Err(_elapsed) => Err(CloudError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}
