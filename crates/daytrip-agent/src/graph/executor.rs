use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};
use uuid::Uuid;

use daytrip_core::error::Result;

use super::step::Step;

/// Where control goes after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Step(usize),
    End,
}

pub(crate) struct CompiledStep<S> {
    pub(crate) name: String,
    pub(crate) step: Arc<dyn Step<S>>,
    pub(crate) next: Transition,
}

/// Timing for one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: String,
    pub elapsed_ms: u64,
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct ExecutionResult<S> {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    /// Final state after the last step.
    pub state: S,
    /// Executed steps in order.
    pub steps: Vec<StepRecord>,
    pub total_elapsed_ms: u64,
}

/// A validated chain of steps, ready to run.
///
/// Immutable once compiled; each call to [`run`](Self::run) threads its own
/// state value, so one workflow can serve independent runs.
pub struct CompiledWorkflow<S> {
    steps: Vec<CompiledStep<S>>,
    entry: usize,
}

impl<S: Send + 'static> CompiledWorkflow<S> {
    pub(crate) fn new(steps: Vec<CompiledStep<S>>, entry: usize) -> Self {
        Self { steps, entry }
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Name of the entry step.
    pub fn entry(&self) -> &str {
        &self.steps[self.entry].name
    }

    /// Step names in execution order.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.steps.len());
        let mut current = Transition::Step(self.entry);
        while let Transition::Step(idx) = current {
            path.push(self.steps[idx].name.as_str());
            current = self.steps[idx].next;
        }
        path
    }

    /// Run every step in order and return the final state.
    pub async fn run(&self, initial: S) -> Result<S> {
        self.execute(initial).await.map(|result| result.state)
    }

    /// Run every step in order, recording timings.
    ///
    /// The first step error aborts the run and is returned unchanged.
    pub async fn execute(&self, initial: S) -> Result<ExecutionResult<S>> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let start = Instant::now();

        let mut state = initial;
        let mut records = Vec::with_capacity(self.steps.len());
        let mut current = Transition::Step(self.entry);

        info!(run_id = %run_id, entry = %self.entry(), "Workflow run started");

        while let Transition::Step(idx) = current {
            let node = &self.steps[idx];
            debug!(run_id = %run_id, step = %node.name, "Executing step");

            let step_start = Instant::now();
            state = match node.step.run(state).await {
                Ok(next) => next,
                Err(e) => {
                    error!(run_id = %run_id, step = %node.name, error = %e, "Step failed");
                    return Err(e);
                }
            };
            let elapsed_ms = step_start.elapsed().as_millis() as u64;

            debug!(run_id = %run_id, step = %node.name, elapsed_ms, "Step complete");
            records.push(StepRecord {
                step: node.name.clone(),
                elapsed_ms,
            });
            current = node.next;
        }

        let total_elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            steps = records.len(),
            total_elapsed_ms,
            "Workflow run complete"
        );

        Ok(ExecutionResult {
            run_id,
            started_at,
            state,
            steps: records,
            total_elapsed_ms,
        })
    }
}
