// ABOUTME: ARM template provisioning: embedded templates, submission, monitoring.
// ABOUTME: Stateless functions taking explicit client arguments.

mod monitor;
mod submit;
mod template;

pub use monitor::{DEFAULT_POLL_INTERVAL, DeploymentMonitor, MonitorError, PollState, StatusSink};
pub use submit::submit_deployment;
pub use template::{EmbeddedTemplate, set_parameter};
