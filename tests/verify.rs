// ABOUTME: Integration tests for configuration validation against the cloud API.
// ABOUTME: Covers the success path, error pass-through, and the bounded timeout.

mod support;

use std::time::Duration;

use skafos::cloud::{CloudError, CloudErrorKind, verify_configuration};
use skafos::types::AppName;

use support::MockCloud;

fn app() -> AppName {
    AppName::new("my-app").unwrap()
}

#[tokio::test]
async fn passes_when_the_availability_check_answers() {
    let client = MockCloud::node();

    verify_configuration(&client, &app(), Duration::from_secs(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn surfaces_api_failures_unchanged() {
    let mut client = MockCloud::node();
    client.fail_availability = true;

    let err = verify_configuration(&client, &app(), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CloudErrorKind::Api);
}

#[tokio::test]
async fn times_out_when_the_call_never_answers() {
    let mut client = MockCloud::node();
    client.availability_delay = Some(Duration::from_secs(60));

    let err = verify_configuration(&client, &app(), Duration::from_millis(20))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CloudErrorKind::Timeout);
    assert!(matches!(err, CloudError::Timeout { seconds: 0 }));
}

#[tokio::test]
async fn reports_the_timeout_bound_in_seconds() {
    let mut client = MockCloud::node();
    client.availability_delay = Some(Duration::from_secs(60));

    tokio::time::pause();
    let err = verify_configuration(&client, &app(), Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::Timeout { seconds: 5 }));
}
