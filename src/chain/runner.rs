// ABOUTME: Drives the deployment chain one step at a time.
// ABOUTME: Single-threaded, synchronous advance; terminal state decides the result.

use super::context::DeploymentContext;
use super::step::{ChainState, StepOutcome};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::steps::StepExecutor;

/// Run a configured chain to completion.
///
/// Executes the current step, advances along the success/failure target,
/// and stops at the first terminal state. A chain that ends in failure
/// reports the step that caused it.
pub async fn run_chain(
    ctx: &mut DeploymentContext,
    executor: &StepExecutor,
    output: &Output,
) -> Result<()> {
    let mut last_step = ctx.current_step();

    while ctx.state() == ChainState::Running {
        let step = ctx
            .current_step()
            .expect("running chain has a current step");
        last_step = Some(step);

        output.progress(&format!("  → Running {}...", step));
        let outcome = executor.run(step, ctx).await;

        if outcome != StepOutcome::Success {
            tracing::warn!(step = %step, ?outcome, "deployment step did not succeed");
        }

        ctx.advance(outcome);
    }

    match ctx.state() {
        ChainState::Succeeded => Ok(()),
        _ => {
            let step = last_step.map(|s| s.name()).unwrap_or("unknown");
            Err(Error::Deploy(format!("chain failed at step {}", step)))
        }
    }
}
