// ABOUTME: Integration tests for chain selection, slot resolution, and the runner.
// ABOUTME: Uses a mock cloud client and scripted steps; no network or Docker daemon.

mod support;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skafos::chain::{
    ChainState, CommandChain, DeploymentContext, StepKind, StepOutcome, run_chain,
};
use skafos::cloud::RuntimeStack;
use skafos::config::Config;
use skafos::error::Error;
use skafos::output::{Output, OutputMode};
use skafos::steps::{DeployStep, StepExecutor};

use support::MockCloud;

fn java_runtime() -> RuntimeStack {
    RuntimeStack::Java {
        version: "17".to_string(),
    }
}

fn node_runtime() -> RuntimeStack {
    RuntimeStack::Other("NODE|20-lts".to_string())
}

fn config_from(yaml: &str) -> Config {
    Config::from_yaml(yaml).unwrap()
}

#[test]
fn docker_publish_selects_build_push_deploy() {
    let chain = CommandChain::build(Some("docker"), &java_runtime(), false);

    assert_eq!(
        chain.success_path(),
        vec![
            StepKind::DockerBuild,
            StepKind::DockerPush,
            StepKind::DockerDeploy,
        ]
    );
}

#[test]
fn docker_publish_with_delete_flag_appends_image_removal() {
    let chain = CommandChain::build(Some("docker"), &node_runtime(), true);

    assert_eq!(
        chain.success_path(),
        vec![
            StepKind::DockerBuild,
            StepKind::DockerPush,
            StepKind::DockerDeploy,
            StepKind::RemoveTempImage,
        ]
    );
}

#[test]
fn docker_publish_type_is_case_insensitive() {
    for publish in ["DOCKER", "Docker", "dOcKeR"] {
        let chain = CommandChain::build(Some(publish), &java_runtime(), false);
        assert_eq!(chain.start(), StepKind::DockerBuild, "publish={publish}");
    }
}

#[test]
fn docker_takes_precedence_over_java_runtime() {
    let chain = CommandChain::build(Some("docker"), &java_runtime(), false);
    assert!(chain.contains(StepKind::DockerBuild));
    assert!(!chain.contains(StepKind::FtpDeploy));
}

#[test]
fn java_runtime_deploys_over_ftp() {
    let chain = CommandChain::build(None, &java_runtime(), false);
    assert_eq!(chain.success_path(), vec![StepKind::FtpDeploy]);
}

#[test]
fn non_java_runtime_deploys_over_git() {
    let chain = CommandChain::build(None, &node_runtime(), false);
    assert_eq!(chain.success_path(), vec![StepKind::GitDeploy]);
}

#[test]
fn unrecognized_publish_type_falls_back_to_runtime() {
    let chain = CommandChain::build(Some("zip"), &java_runtime(), false);
    assert_eq!(chain.start(), StepKind::FtpDeploy);
}

#[test]
fn delete_flag_is_ignored_outside_docker() {
    let chain = CommandChain::build(None, &node_runtime(), true);
    assert!(!chain.contains(StepKind::RemoveTempImage));
}

#[test]
fn failure_has_no_target_and_ends_the_chain() {
    let chain = CommandChain::build(Some("docker"), &node_runtime(), true);
    for step in chain.success_path() {
        assert_eq!(chain.next(step, StepOutcome::Failure), None);
        assert_eq!(chain.next(step, StepOutcome::Unknown), None);
    }
}

#[tokio::test]
async fn configure_resolves_default_publishing_profile() {
    let client = MockCloud::java();
    let config = config_from("app: my-app\nresource_group: my-rg\n");

    let ctx = DeploymentContext::configure(&client, config).await.unwrap();

    assert_eq!(ctx.publishing_profile().username, "$production");
    assert_eq!(ctx.current_step(), Some(StepKind::FtpDeploy));
    assert_eq!(ctx.state(), ChainState::Running);
}

#[tokio::test]
async fn configure_resolves_named_slot_profile() {
    let client = MockCloud::java().with_slots(&["staging"]);
    let config = config_from("app: my-app\nresource_group: my-rg\nslot: staging\n");

    let ctx = DeploymentContext::configure(&client, config).await.unwrap();

    assert_eq!(ctx.publishing_profile().username, "$staging");
}

#[tokio::test]
async fn configure_fails_when_slot_does_not_exist() {
    let client = MockCloud::java().with_slots(&["staging"]);
    let config = config_from("app: my-app\nresource_group: my-rg\nslot: canary\n");

    let err = DeploymentContext::configure(&client, config)
        .await
        .unwrap_err();

    match err {
        Error::SlotNotFound(slot) => assert_eq!(slot, "canary"),
        other => panic!("expected SlotNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn configure_treats_blank_slot_as_unset() {
    let client = MockCloud::java();
    let config = config_from("app: my-app\nresource_group: my-rg\nslot: \"  \"\n");

    let ctx = DeploymentContext::configure(&client, config).await.unwrap();

    assert_eq!(ctx.publishing_profile().username, "$production");
}

#[tokio::test]
async fn configure_surfaces_profile_fetch_errors() {
    let mut client = MockCloud::java();
    client.fail_profile = true;
    let config = config_from("app: my-app\nresource_group: my-rg\n");

    let err = DeploymentContext::configure(&client, config)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CloudOperation(_)));
}

/// Step that records its invocation and reports a fixed outcome.
struct ScriptedStep {
    kind: StepKind,
    outcome: StepOutcome,
    log: Arc<Mutex<Vec<StepKind>>>,
}

#[async_trait]
impl DeployStep for ScriptedStep {
    fn kind(&self) -> StepKind {
        self.kind
    }

    async fn run(&self, _ctx: &DeploymentContext) -> StepOutcome {
        self.log.lock().unwrap().push(self.kind);
        self.outcome
    }
}

fn scripted(
    log: &Arc<Mutex<Vec<StepKind>>>,
    kind: StepKind,
    outcome: StepOutcome,
) -> Box<dyn DeployStep> {
    Box::new(ScriptedStep {
        kind,
        outcome,
        log: log.clone(),
    })
}

#[tokio::test]
async fn run_chain_executes_docker_steps_in_order() {
    let client = MockCloud::node();
    let config = config_from(
        "app: my-app\nresource_group: my-rg\npublish: docker\ndocker:\n  image: my-app:ci\n  delete_temp_image: true\n",
    );

    let mut ctx = DeploymentContext::configure(&client, config).await.unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let executor = StepExecutor::new()
        .register(scripted(&log, StepKind::DockerBuild, StepOutcome::Success))
        .register(scripted(&log, StepKind::DockerPush, StepOutcome::Success))
        .register(scripted(&log, StepKind::DockerDeploy, StepOutcome::Success))
        .register(scripted(
            &log,
            StepKind::RemoveTempImage,
            StepOutcome::Success,
        ));

    run_chain(&mut ctx, &executor, &Output::new(OutputMode::Quiet))
        .await
        .unwrap();

    assert_eq!(ctx.state(), ChainState::Succeeded);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            StepKind::DockerBuild,
            StepKind::DockerPush,
            StepKind::DockerDeploy,
            StepKind::RemoveTempImage,
        ]
    );
}

#[tokio::test]
async fn run_chain_stops_at_first_failed_step() {
    let client = MockCloud::node();
    let config = config_from(
        "app: my-app\nresource_group: my-rg\npublish: docker\ndocker:\n  image: my-app:ci\n",
    );

    let mut ctx = DeploymentContext::configure(&client, config).await.unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    let executor = StepExecutor::new()
        .register(scripted(&log, StepKind::DockerBuild, StepOutcome::Success))
        .register(scripted(&log, StepKind::DockerPush, StepOutcome::Failure))
        .register(scripted(&log, StepKind::DockerDeploy, StepOutcome::Success));

    let err = run_chain(&mut ctx, &executor, &Output::new(OutputMode::Quiet))
        .await
        .unwrap_err();

    assert_eq!(ctx.state(), ChainState::Failed);
    assert_eq!(
        *log.lock().unwrap(),
        vec![StepKind::DockerBuild, StepKind::DockerPush]
    );
    assert!(err.to_string().contains("docker-push"));
}

#[tokio::test]
async fn run_chain_fails_when_step_has_no_implementation() {
    let client = MockCloud::java();
    let config = config_from("app: my-app\nresource_group: my-rg\n");

    let mut ctx = DeploymentContext::configure(&client, config).await.unwrap();

    // Executor with nothing registered: the FTP step resolves to Unknown.
    let executor = StepExecutor::new();
    let result = run_chain(&mut ctx, &executor, &Output::new(OutputMode::Quiet)).await;

    assert!(result.is_err());
    assert_eq!(ctx.state(), ChainState::Failed);
}
