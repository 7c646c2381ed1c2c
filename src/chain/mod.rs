// ABOUTME: Deployment command chain: step selection, transitions, and driving loop.
// ABOUTME: One step is current at a time; the chain never revisits a completed step.

mod context;
mod runner;
mod step;
mod transitions;

pub use context::DeploymentContext;
pub use runner::run_chain;
pub use step::{ChainState, StepKind, StepOutcome};
pub use transitions::{CommandChain, Transition};
