// ABOUTME: Chain construction: publish-type selection and the transition graph.
// ABOUTME: Enum-keyed map of {success target, failure target} per step.

use std::collections::HashMap;

use super::step::{StepKind, StepOutcome};
use crate::cloud::RuntimeStack;
use crate::config::PUBLISH_TYPE_DOCKER;

/// Where the chain goes after a step reports its outcome.
///
/// `None` on the taken branch ends the chain there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub on_success: Option<StepKind>,
    pub on_failure: Option<StepKind>,
}

impl Transition {
    fn terminal() -> Self {
        Transition {
            on_success: None,
            on_failure: None,
        }
    }

    fn then(next: StepKind) -> Self {
        Transition {
            on_success: Some(next),
            on_failure: None,
        }
    }
}

/// The directed transition graph for one deployment, plus its start step.
#[derive(Debug, Clone)]
pub struct CommandChain {
    start: StepKind,
    transitions: HashMap<StepKind, Transition>,
}

impl CommandChain {
    /// Build the chain for a deployment. First match wins:
    ///
    /// 1. publish type "docker" (case-insensitive): build, push, deploy,
    ///    then optionally remove the temp image;
    /// 2. a Java runtime target: FTP deploy only;
    /// 3. anything else: Git deploy only.
    pub fn build(
        publish_type: Option<&str>,
        runtime: &RuntimeStack,
        delete_temp_image: bool,
    ) -> Self {
        let is_docker = publish_type
            .map(|p| p.eq_ignore_ascii_case(PUBLISH_TYPE_DOCKER))
            .unwrap_or(false);

        let mut transitions = HashMap::new();

        let start = if is_docker {
            transitions.insert(StepKind::DockerBuild, Transition::then(StepKind::DockerPush));
            transitions.insert(StepKind::DockerPush, Transition::then(StepKind::DockerDeploy));
            if delete_temp_image {
                transitions.insert(
                    StepKind::DockerDeploy,
                    Transition::then(StepKind::RemoveTempImage),
                );
                transitions.insert(StepKind::RemoveTempImage, Transition::terminal());
            } else {
                transitions.insert(StepKind::DockerDeploy, Transition::terminal());
            }
            StepKind::DockerBuild
        } else if runtime.is_java() {
            // FTP is the recommended path for Java applications.
            transitions.insert(StepKind::FtpDeploy, Transition::terminal());
            StepKind::FtpDeploy
        } else {
            transitions.insert(StepKind::GitDeploy, Transition::terminal());
            StepKind::GitDeploy
        };

        Self { start, transitions }
    }

    pub fn start(&self) -> StepKind {
        self.start
    }

    pub fn transition(&self, step: StepKind) -> Option<&Transition> {
        self.transitions.get(&step)
    }

    /// The step to run after `step` reports `outcome`, if any.
    pub fn next(&self, step: StepKind, outcome: StepOutcome) -> Option<StepKind> {
        let transition = self.transitions.get(&step)?;
        match outcome {
            StepOutcome::Success => transition.on_success,
            StepOutcome::Failure => transition.on_failure,
            StepOutcome::Unknown => None,
        }
    }

    pub fn contains(&self, step: StepKind) -> bool {
        self.transitions.contains_key(&step)
    }

    /// The steps visited in order when every step succeeds.
    pub fn success_path(&self) -> Vec<StepKind> {
        let mut path = Vec::with_capacity(self.transitions.len());
        let mut current = Some(self.start);
        while let Some(step) = current {
            path.push(step);
            current = self.next(step, StepOutcome::Success);
        }
        path
    }
}
