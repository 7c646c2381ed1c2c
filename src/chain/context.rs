// ABOUTME: Per-build deployment context: config, resolved profile, chain state.
// ABOUTME: Configured once per deployment, then mutated as each step executes.

use super::step::{ChainState, StepKind, StepOutcome};
use super::transitions::CommandChain;
use crate::cloud::{PublishingProfile, WebApp, WebAppOps};
use crate::config::Config;
use crate::error::{Error, Result};

/// Everything one deployment needs, alive for a single build invocation.
///
/// Holds the resolved publishing profile and web app handle alongside the
/// transition graph. Exactly one step is current while the chain runs.
#[derive(Debug)]
pub struct DeploymentContext {
    config: Config,
    web_app: WebApp,
    profile: PublishingProfile,
    chain: CommandChain,
    current: Option<StepKind>,
    state: ChainState,
}

impl DeploymentContext {
    /// Resolve the publishing profile and build the transition graph.
    ///
    /// The profile comes from the app's default target, or from the named
    /// deployment slot when one is configured. A missing slot fails with
    /// `Error::SlotNotFound` before any profile is stored; other client
    /// failures surface as `Error::CloudOperation`.
    pub async fn configure<C: WebAppOps + ?Sized>(client: &C, config: Config) -> Result<Self> {
        let web_app = client
            .get_web_app(&config.resource_group, &config.app)
            .await?;

        let profile = match config.slot_name() {
            None => {
                client
                    .get_publishing_profile(&config.resource_group, &config.app)
                    .await?
            }
            Some(slot) => client
                .get_slot_publishing_profile(&config.resource_group, &config.app, slot)
                .await?
                .ok_or_else(|| Error::SlotNotFound(slot.to_string()))?,
        };

        let chain = CommandChain::build(
            config.publish_type(),
            &web_app.runtime,
            config.delete_temp_image(),
        );
        let start = chain.start();

        tracing::debug!(start = %start, "deployment chain configured");

        Ok(Self {
            config,
            web_app,
            profile,
            chain,
            current: Some(start),
            state: ChainState::Running,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn web_app(&self) -> &WebApp {
        &self.web_app
    }

    pub fn publishing_profile(&self) -> &PublishingProfile {
        &self.profile
    }

    pub fn chain(&self) -> &CommandChain {
        &self.chain
    }

    /// The step to run next, while the chain is running.
    pub fn current_step(&self) -> Option<StepKind> {
        self.current
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Advance past the current step using its reported outcome.
    ///
    /// Reaching a step with no target on the taken branch ends the chain in
    /// a terminal state matching that step's result.
    pub fn advance(&mut self, outcome: StepOutcome) {
        let Some(current) = self.current else {
            return;
        };

        match self.chain.next(current, outcome) {
            Some(next) => {
                self.current = Some(next);
            }
            None => {
                self.current = None;
                self.state = match outcome {
                    StepOutcome::Success => ChainState::Succeeded,
                    StepOutcome::Failure | StepOutcome::Unknown => ChainState::Failed,
                };
            }
        }
    }
}
